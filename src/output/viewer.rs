//! Hand a rendered chart to the platform's default viewer

use std::error::Error;
use std::path::Path;
use std::process::Command;

use log::info;

/// Command that opens `path` with the default application of this platform
fn viewer_command(path: &Path) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    }

    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("open");
        command.arg(path);
        command
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

/// Open `path` in the default viewer without waiting for it to close
pub fn open_with_default_viewer(path: &Path) -> Result<(), Box<dyn Error>> {
    if !path.is_file() {
        return Err(format!("Cannot display '{}': no such file", path.display()).into());
    }

    viewer_command(path).spawn()?;
    info!("Opened {} in the default viewer", path.display());

    Ok(())
}
