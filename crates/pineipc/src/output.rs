use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Print a set of labeled fields in the selected format. `raw` is the
/// byte-level fallback used by the `raw` format (reply payloads).
pub fn print_record(rows: &[(&str, String)], raw: Option<&[u8]>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = rows
                .iter()
                .map(|(k, v)| ((*k).to_string(), serde_json::Value::String(v.clone())))
                .collect();
            println!(
                "{}",
                serde_json::to_string(&serde_json::Value::Object(map))
                    .unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (key, value) in rows {
                table.add_row(vec![(*key).to_string(), value.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let line: Vec<String> = rows.iter().map(|(k, v)| format!("{k}={v}")).collect();
            println!("{}", line.join(" "));
        }
        OutputFormat::Raw => match raw {
            Some(bytes) => print_raw(bytes),
            None => {
                for (_, value) in rows {
                    println!("{value}");
                }
            }
        },
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Render a reply payload for humans: UTF-8 text when it is text, a
/// hex dump preview otherwise.
pub fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) if text.chars().all(|c| !c.is_control() || c.is_whitespace()) => {
            text.to_string()
        }
        _ => {
            let hex: Vec<String> = payload.iter().map(|b| format!("{b:02x}")).collect();
            format!("0x{}", hex.join(""))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_payload_previewed_as_text() {
        assert_eq!(payload_preview(b"PCSX2 2.2.0"), "PCSX2 2.2.0");
    }

    #[test]
    fn binary_payload_previewed_as_hex() {
        assert_eq!(payload_preview(&[0xDE, 0xAD]), "0xdead");
        assert_eq!(payload_preview(b"a\0b"), "0x610062");
    }
}
