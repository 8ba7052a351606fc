use anyhow::bail;
use clap::Parser;
use core::time::Duration;
use plzsync::{DEFAULT_LOOKUP_BASE_URL, DEFAULT_MIN_POSTAL_CODE_DIGITS, ResolverConfig};

/// German postal codes are exactly this long.
const POSTAL_CODE_DIGITS: usize = 5;

/// Runtime configuration for the `plzsync` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file in the working directory is honoured). The defaults reproduce
/// the form's usual behaviour against the public OpenPLZ API.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "plzsync",
    version,
    about = "Resolve German localities and postal codes as you type"
)]
pub struct CliArgs {
    /// Base address of the locality lookup endpoint.
    ///
    /// Queried as `<base>?name=<locality>` and `<base>?postalCode=<plz>`.
    ///
    /// Environment variable: `PLZ_LOOKUP_BASE_URL`
    #[arg(long, env = "PLZ_LOOKUP_BASE_URL", default_value_t = String::from(DEFAULT_LOOKUP_BASE_URL))]
    pub base_url: String,

    /// Quiet period, in milliseconds, a field must observe before its lookup
    /// fires.
    ///
    /// Environment variable: `PLZ_DEBOUNCE_MS`
    #[arg(long, env = "PLZ_DEBOUNCE_MS", default_value_t = 1000)]
    pub debounce_ms: u64,

    /// Postal codes with fewer digits than this are never looked up.
    ///
    /// Environment variable: `PLZ_MIN_DIGITS`
    #[arg(long, env = "PLZ_MIN_DIGITS", default_value_t = DEFAULT_MIN_POSTAL_CODE_DIGITS)]
    pub min_digits: usize,

    /// Per-request timeout of the HTTP lookup, in seconds.
    ///
    /// Environment variable: `PLZ_LOOKUP_TIMEOUT_SECS`
    #[arg(long, env = "PLZ_LOOKUP_TIMEOUT_SECS", default_value_t = 10)]
    pub lookup_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct HostConfig {
    pub base_url: String,
    pub lookup_timeout: Duration,
    pub resolver: ResolverConfig,
}

impl TryFrom<CliArgs> for HostConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !(args.base_url.starts_with("http://") || args.base_url.starts_with("https://")) {
            bail!(
                "PLZ_LOOKUP_BASE_URL must be an http(s) address, got `{}`",
                args.base_url
            );
        }

        if args.min_digits == 0 {
            bail!("PLZ_MIN_DIGITS must be greater than 0");
        }

        if args.min_digits > POSTAL_CODE_DIGITS {
            bail!(
                "PLZ_MIN_DIGITS ({}) exceeds the length of a postal code ({})",
                args.min_digits,
                POSTAL_CODE_DIGITS
            );
        }

        if args.lookup_timeout_secs == 0 {
            bail!("PLZ_LOOKUP_TIMEOUT_SECS must be greater than 0");
        }

        Ok(Self {
            base_url: args.base_url,
            lookup_timeout: Duration::from_secs(args.lookup_timeout_secs),
            resolver: ResolverConfig::default()
                .with_debounce(Duration::from_millis(args.debounce_ms))
                .with_min_postal_code_digits(args.min_digits),
        })
    }
}
