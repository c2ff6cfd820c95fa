use crate::config::Config;
use crate::errors::{AppError, AppResult};

use crate::cli::parser::Commands;
use crate::ui::messages::success;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *edit_config {
            let editor = pick_editor(editor.as_deref());
            match Command::new(&editor).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!(
                        "Configuration file edited successfully using '{}'",
                        editor
                    ));
                }
                Ok(s) => {
                    return Err(AppError::Config(format!("editor '{}' exited with {}", editor, s)));
                }
                Err(e) => {
                    return Err(AppError::Config(format!("cannot run editor '{}': {}", editor, e)));
                }
            }
        }
    }

    Ok(())
}

/// `--editor`, then $EDITOR, then $VISUAL, then the platform default.
fn pick_editor(requested: Option<&str>) -> String {
    requested
        .map(str::to_string)
        .or_else(|| std::env::var("EDITOR").ok())
        .or_else(|| std::env::var("VISUAL").ok())
        .unwrap_or_else(|| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_editor_wins() {
        assert_eq!(pick_editor(Some("vim")), "vim");
    }
}
