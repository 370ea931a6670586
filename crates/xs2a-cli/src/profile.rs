//! # `xs2a profile` — ASPSP Profile Check
//!
//! Parses a profile file, prints the effective settings (defaults filled
//! in) as JSON and lists every consistency problem. Exit code 0 when the
//! profile is usable, 2 when it parsed but is inconsistent.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use xs2a_service::AspspProfile;

/// Arguments for `xs2a profile`.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Path to the ASPSP profile YAML file.
    #[arg(long)]
    pub profile: PathBuf,

    /// Print only the problems, not the effective settings.
    #[arg(long)]
    pub quiet: bool,
}

/// Exit code for a profile that parsed but is inconsistent.
pub const EXIT_INCONSISTENT: u8 = 2;

pub fn run_profile(args: &ProfileArgs) -> anyhow::Result<u8> {
    let yaml = std::fs::read_to_string(&args.profile)
        .with_context(|| format!("reading {}", args.profile.display()))?;
    let profile = AspspProfile::from_yaml(&yaml)
        .with_context(|| format!("parsing {}", args.profile.display()))?;

    if !args.quiet {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    }

    let problems = profile.validate();
    if problems.is_empty() {
        tracing::info!(path = %args.profile.display(), "profile is consistent");
        return Ok(0);
    }
    for problem in &problems {
        eprintln!("problem: {problem}");
    }
    tracing::warn!(count = problems.len(), "profile is inconsistent");
    Ok(EXIT_INCONSISTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn profile_file(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    fn run(file: &tempfile::NamedTempFile) -> anyhow::Result<u8> {
        run_profile(&ProfileArgs {
            profile: file.path().to_path_buf(),
            quiet: true,
        })
    }

    #[test]
    fn consistent_profile_exits_zero() {
        let file = profile_file("sca_redirect_flow: OAUTH\nauthorisation_confirmation_request_mandated: true\n");
        assert_eq!(run(&file).unwrap(), 0);
    }

    #[test]
    fn empty_file_is_the_default_profile() {
        let file = profile_file("");
        assert_eq!(run(&file).unwrap(), 0);
    }

    #[test]
    fn inconsistent_profile_exits_two() {
        let file = profile_file(
            "sca_redirect_flow: OAUTH_PRE_STEP\nauthorisation_confirmation_request_mandated: true\n",
        );
        assert_eq!(run(&file).unwrap(), EXIT_INCONSISTENT);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let file = profile_file("sca_redirect_flw: OAUTH\n");
        assert!(run(&file).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_profile(&ProfileArgs {
            profile: dir.path().join("absent.yaml"),
            quiet: true,
        });
        assert!(result.is_err());
    }
}
