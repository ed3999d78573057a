//! Subcommand implementations

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::config::KedqrConfig;
use crate::pin::Pin;
use crate::pipeline;
use crate::render::QrRenderer;

/// Encode a bech32 secret key file into a PIN-protected QR code.
///
/// The QR code goes to `output` when given, falling back to `console` if the
/// file cannot be written. Afterwards the QR payload is decrypted again and
/// compared with the input.
pub fn encode(
    config: &KedqrConfig,
    input: &Path,
    pin: &Pin,
    output: Option<&Path>,
    console: &mut dyn Write,
) -> Result<()> {
    let secret_key = pipeline::read_secret_key(input)?;
    let sealed = pipeline::seal_secret_key(&config.key, &secret_key, pin)?;
    let qr_payload = hex::encode(&sealed);

    let renderer = QrRenderer::new(config.ec_level()?);
    match output {
        Some(path) => {
            if let Err(e) = renderer.write_file(&sealed, path) {
                log::error!("{:#}", e);
                writeln!(console, "\n{}", renderer.render_text(&sealed)?)?;
            } else {
                log::info!("QR code written to {}", path.display());
            }
        }
        None => writeln!(console, "\n{}", renderer.render_text(&sealed)?)?,
    }

    pipeline::verify_roundtrip(&config.key, &qr_payload, pin, &secret_key)
}

/// Recover the bech32 secret key from the hex payload of a KedQR code.
pub fn decode(
    config: &KedqrConfig,
    payload: &str,
    pin: &Pin,
    console: &mut dyn Write,
) -> Result<()> {
    let envelope_bytes = pipeline::parse_qr_payload(payload)?;
    let secret_key = pipeline::recover_secret_key(&config.key, &envelope_bytes, pin)?;
    writeln!(console, "{}", secret_key.as_str()).context("Failed to write secret key")?;
    Ok(())
}

/// Print the effective configuration.
pub fn show_config(config: &KedqrConfig, console: &mut dyn Write) -> Result<()> {
    writeln!(console, "Configuration is valid.")?;
    writeln!(console, "  Key hrp:      {}", config.key.hrp)?;
    writeln!(console, "  Key length:   {} bytes", config.key.length)?;
    writeln!(console, "  PIN length:   {} digits", config.pin.length)?;
    writeln!(console, "  QR EC level:  {}", config.qr.ec_level)?;
    writeln!(console, "  Log level:    {}", config.log.level)?;
    Ok(())
}
