//! Bootstrap script renderer.
//!
//! Emits a bash script that writes every file and unit to disk, reloads
//! systemd and enables/restarts the units. File content is transported
//! base64 encoded unless the file asks to be transmitted unencoded.

use crate::content::ResolvedFile;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crds::{Unit, UnitCommand};
use std::path::Path;

/// Directory systemd units are written to
pub const DEFAULT_UNITS_PATH: &str = "/etc/systemd/system";

#[derive(Debug, Clone)]
pub struct ScriptRenderer {
    units_path: String,
}

impl Default for ScriptRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_UNITS_PATH)
    }
}

impl ScriptRenderer {
    pub fn new(units_path: impl Into<String>) -> Self {
        Self { units_path: units_path.into() }
    }

    /// Renders the script for the given files and units.
    pub fn render(&self, files: &[ResolvedFile], units: &[Unit]) -> String {
        let mut out = String::from("#!/bin/bash\n");

        for file in files {
            out.push('\n');
            out.push_str(&write_file(&file.path, &file.data, file.transmit_unencoded));
            if let Some(permissions) = file.permissions {
                out.push_str(&format!(
                    "chmod '{:04o}' {}\n",
                    permissions & 0o7777,
                    shell_quote(&file.path)
                ));
            }
        }

        for unit in units {
            let unit_path = format!("{}/{}", self.units_path, unit.name);
            if let Some(content) = &unit.content {
                out.push('\n');
                out.push_str(&write_file(&unit_path, content.as_bytes(), false));
            }
            for drop_in in &unit.drop_ins {
                let drop_in_path = format!("{}.d/{}", unit_path, drop_in.name);
                out.push('\n');
                out.push_str(&write_file(&drop_in_path, drop_in.content.as_bytes(), false));
            }
        }

        out.push_str("\nsystemctl daemon-reload\n");
        for unit in units {
            if let Some(line) = unit_activation(unit) {
                out.push_str(&line);
                out.push('\n');
            }
        }

        out
    }
}

/// `systemctl` invocation for a unit after it was written, if any.
fn unit_activation(unit: &Unit) -> Option<String> {
    let name = shell_quote(&unit.name);
    let verb = unit.command.unwrap_or(UnitCommand::Restart).as_systemctl_verb();

    if unit.is_enabled() {
        Some(format!("systemctl enable {name} && systemctl {verb} {name}"))
    } else {
        unit.command.map(|_| format!("systemctl {verb} {name}"))
    }
}

fn write_file(path: &str, data: &[u8], transmit_unencoded: bool) -> String {
    let dir = Path::new(path)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "/".to_string());

    let mut out = format!("mkdir -p {}\n", shell_quote(&dir));

    // A heredoc always ends with a newline, so only newline-terminated text
    // can be written verbatim.
    match std::str::from_utf8(data) {
        Ok(text) if transmit_unencoded && text.ends_with('\n') => {
            let delimiter = heredoc_delimiter(text);
            out.push_str(&format!(
                "cat << '{delimiter}' > {}\n{text}{delimiter}\n",
                shell_quote(path)
            ));
        }
        _ => {
            out.push_str(&format!(
                "cat << EOF | base64 -d > {}\n{}\nEOF\n",
                shell_quote(path),
                STANDARD.encode(data)
            ));
        }
    }
    out
}

/// `EOF`, extended until no line of `text` equals it.
fn heredoc_delimiter(text: &str) -> String {
    let mut delimiter = String::from("EOF");
    while text.lines().any(|line| line == delimiter) {
        delimiter.push('_');
    }
    delimiter
}

/// Single-quotes a word for bash.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
