use std::process::Command;

/// Builds a command that runs `command_str` through the platform shell.
///
/// `sh -c` everywhere but Windows, where `cmd /C` is used. Shell syntax
/// (arguments, quoting, environment expansion) therefore works in pager
/// commands such as `less -R` or `$PAGER`.
pub fn shell_command(command_str: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command_str);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_str);
        c
    }
}
