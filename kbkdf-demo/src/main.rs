//! Derives one KBKDF counter-mode vector from hardcoded hex inputs and
//! prints the key.
//!
//! Set `KBKDF_CONFIG` to a JSON file to override the derivation settings
//! and `RUST_LOG` to change log verbosity. Logs go to stderr.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use std::process::ExitCode;

use anyhow::Context;
use kbkdf_core::{CoreError, DerivationRequest, KbkdfConfig, logging::init_tracing, to_colon_hex};
use kbkdf_primitives::{FieldWidth, KdfError, self_test::run_power_up_tests};
use tracing::info;

// PRF=HMAC_SHA256, 8-bit counter before the fixed input,
// fixed input = Label || 0x00 || Context || [L]_32
const INPUT_KI: &str = "3edc6b5b8f7aadbd713732b482b8f979286e1ea3b8f8f99c30c884cfe3349b83";
const INPUT_LABEL: &str = "deadbeef";
const INPUT_CONTEXT: &str = "deadbeef";
const INPUT_L: u32 = 128;

const CONFIG_ENV: &str = "KBKDF_CONFIG";

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error encountered: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run() -> anyhow::Result<()> {
    run_power_up_tests().to_result().context("Power-up self-test failed")?;

    let config = load_config()?;
    info!(prf = %config.prf, counter_width = %config.counter_width, "Configuration loaded");

    println!("Performing the derivation");
    let request = DerivationRequest::new(INPUT_KI, INPUT_LABEL, INPUT_CONTEXT, INPUT_L);
    let key = request.derive_key(&config)?;

    println!("Derived key: {}", to_colon_hex(key.key()));
    Ok(())
}

fn default_config() -> KbkdfConfig {
    KbkdfConfig::new().with_counter_width(FieldWidth::Bits8)
}

fn load_config() -> anyhow::Result<KbkdfConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => KbkdfConfig::from_json_file(&path).with_context(|| {
            format!("Failed to load {} from {}", CONFIG_ENV, path.to_string_lossy())
        }),
        None => Ok(default_config().build()?),
    }
}

/// Process exit code for a failed run.
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(core) = err.downcast_ref::<CoreError>() {
        return match core {
            CoreError::Kdf(kdf) => kdf_exit_code(kdf),
            CoreError::HexDecode { .. } => 2,
            CoreError::ConfigurationError(_) | CoreError::Io(_) | CoreError::Serialization(_) => 7,
        };
    }
    if let Some(kdf) = err.downcast_ref::<KdfError>() {
        return kdf_exit_code(kdf);
    }
    1
}

fn kdf_exit_code(err: &KdfError) -> u8 {
    match err {
        KdfError::InvalidKey(_) => 3,
        KdfError::InvalidLength(_) => 4,
        KdfError::CounterOverflow { .. } => 5,
        KdfError::PrfFailure(_) => 6,
        KdfError::InvalidParameter(_) => 7,
        KdfError::SelfTestFailed(_) => 8,
    }
}
