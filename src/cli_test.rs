#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use clap::error::ErrorKind;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("dc2deploy").chain(args.iter().copied()))
}

#[test]
fn test_defaults_read_stdin_and_write_stdout_as_yaml() {
    let cli = parse(&[]).unwrap();

    assert_eq!(
        cli.mode().unwrap(),
        Mode::File {
            input: PathBuf::from("-"),
            output: PathBuf::from("-"),
        }
    );
    assert_eq!(cli.output, OutputFormat::Yaml);
    assert!(cli.writes_to_stdout());
    assert!(!cli.ignore_warnings);
}

#[test]
fn test_file_mode_flags() {
    let cli = parse(&["-f", "dc.yaml", "--outfile", "deploy.json", "-o", "json"]).unwrap();

    assert_eq!(
        cli.mode().unwrap(),
        Mode::File {
            input: PathBuf::from("dc.yaml"),
            output: PathBuf::from("deploy.json"),
        }
    );
    assert_eq!(cli.output, OutputFormat::Json);
    assert!(!cli.writes_to_stdout());
}

#[test]
fn test_live_mode_flags() {
    let cli = parse(&["myapp", "-n", "shop", "--kubeconfig", "/tmp/kc", "--dry-run"]).unwrap();

    assert_eq!(
        cli.mode().unwrap(),
        Mode::Live {
            name: "myapp".to_string(),
            namespace: Some("shop".to_string()),
            kubeconfig: Some(PathBuf::from("/tmp/kc")),
            dry_run: true,
        }
    );
    assert!(cli.writes_to_stdout());
}

#[test]
fn test_live_mode_without_dry_run_does_not_write_stdout() {
    let cli = parse(&["myapp"]).unwrap();

    assert!(!cli.writes_to_stdout());
}

#[test]
fn test_name_conflicts_with_filename_and_outfile() {
    let err = parse(&["myapp", "-f", "dc.yaml"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

    let err = parse(&["myapp", "--outfile", "out.yaml"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn test_kubeconfig_conflicts_with_filename() {
    let err = parse(&["--kubeconfig", "/tmp/kc", "-f", "dc.yaml"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn test_live_options_require_a_name() {
    for args in [
        vec!["--dry-run"],
        vec!["-n", "shop"],
        vec!["--kubeconfig", "/tmp/kc"],
    ] {
        let cli = parse(&args).unwrap();
        assert_eq!(cli.mode(), Err(CliError::LiveOptionsWithoutName), "{:?}", args);
    }
}

#[test]
fn test_at_most_one_name() {
    assert!(parse(&["one", "two"]).is_err());
}

#[test]
fn test_invalid_name_is_rejected() {
    let err = parse(&["My_App"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn test_unknown_output_format_is_rejected() {
    let err = parse(&["-o", "toml"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn test_verbosity_is_clamped() {
    let cli = parse(&["-v", "9"]).unwrap();

    assert_eq!(cli.verbosity(), MAX_VERBOSITY);
    assert_eq!(cli.log_level(), "trace");
}

#[test]
fn test_large_verbosity_is_clamped() {
    for level in ["300", "18446744073709551615"] {
        let cli = parse(&["-v", level]).unwrap();
        assert_eq!(cli.verbosity(), MAX_VERBOSITY, "-v {}", level);
    }
}

#[test]
fn test_log_level_per_verbosity() {
    let levels: Vec<&str> = (0..=2)
        .map(|v| parse(&["-v", &v.to_string()]).unwrap().log_level())
        .collect();

    assert_eq!(levels, vec!["warn", "info", "debug"]);
}

#[test]
fn test_validate_dns_subdomain() {
    assert!(validate_dns_subdomain("myapp").is_ok());
    assert!(validate_dns_subdomain("my-app.v2").is_ok());
    assert!(validate_dns_subdomain("0app").is_ok());

    assert!(validate_dns_subdomain("").is_err());
    assert!(validate_dns_subdomain("MyApp").is_err());
    assert!(validate_dns_subdomain("-app").is_err());
    assert!(validate_dns_subdomain("app-").is_err());
    assert!(validate_dns_subdomain("app..v2").is_err());
    assert!(validate_dns_subdomain("my_app").is_err());
    assert!(validate_dns_subdomain(&"a".repeat(254)).is_err());
    assert!(validate_dns_subdomain(&"a".repeat(253)).is_ok());
}
