use crate::errors::ClipboardError;
use crate::password::GeneratedPassword;

pub fn copy(password: &GeneratedPassword) -> Result<(), ClipboardError> {
    let mut ctx = copypasta_ext::try_context().ok_or(ClipboardError::Unavailable)?;

    ctx.set_contents(password.as_str().to_owned())
        .map_err(|e| ClipboardError::Write(e.to_string()))?;

    log::debug!("copied {} characters to clipboard", password.char_count());

    Ok(())
}
