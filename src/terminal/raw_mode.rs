//! Raw mode and alternate screen with panic-safe cleanup.

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether the terminal needs restoring (read by the panic hook).
pub(crate) static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Puts the terminal into raw mode on an alternate screen and restores it
/// on drop, including when unwinding from a panic.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// # Errors
    /// Returns an error if raw mode or the alternate screen can't be entered.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        if let Err(e) = crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All)
        ) {
            let _ = disable_raw_mode();
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            return Err(e);
        }

        Ok(Self { active: true })
    }

    /// Restore the terminal now. Later calls and the drop become no-ops.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            crossterm::execute!(io::stdout(), Show, LeaveAlternateScreen)?;
            disable_raw_mode()?;
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Install (once) a panic hook that restores the terminal before the
/// panic message is printed.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = crossterm::execute!(io::stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
        original_hook(panic_info);
    }));
}
