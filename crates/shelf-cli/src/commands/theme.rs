//! Theme command handler

use anyhow::Result;

use shelf_core::{Theme, ThemeController};

use crate::output::Output;

/// Print the color tokens for a theme
///
/// Starts from `requested` if given, otherwise from the configured theme,
/// then flips it when `toggle` is set.
pub fn show(configured: Theme, requested: Option<Theme>, toggle: bool, output: &Output) -> Result<()> {
    let mut controller = ThemeController::with_theme(configured);
    if let Some(theme) = requested {
        controller.apply(theme);
    }
    if toggle {
        controller.toggle();
    }

    output.print_theme(controller.current(), &controller.tokens());
    Ok(())
}
