use std::env;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Posix,
    PowerShell,
    Cmd,
}

impl ShellType {
    pub fn detect() -> Self {
        if cfg!(windows) {
            // Check if running in PowerShell
            if let Ok(module_path) = env::var("PSModulePath") {
                if !module_path.is_empty() {
                    return ShellType::PowerShell;
                }
            }
            ShellType::Cmd
        } else {
            ShellType::Posix
        }
    }

    /// Program and the flag that makes it run one command string.
    pub fn get_shell_command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            ShellType::Posix => ("sh", &["-c"]),
            ShellType::PowerShell => ("powershell", &["-NoProfile", "-Command"]),
            ShellType::Cmd => ("cmd", &["/C"]),
        }
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShellType::Posix => "sh",
            ShellType::PowerShell => "PowerShell",
            ShellType::Cmd => "Command Prompt",
        };
        f.write_str(name)
    }
}
