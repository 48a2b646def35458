#[cfg(test)]
mod tests {
    use crate::cli::{parse_port, Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("8000"), Ok(8000));
        assert_eq!(parse_port("65535"), Ok(65535));
        assert!(parse_port("0").is_err());
        assert!(parse_port("65536").is_err());
        assert!(parse_port("http").is_err());
    }

    #[test]
    fn test_cli_verbose_quiet_conflict() {
        let result = Cli::try_parse_from(["folio", "--verbose", "--quiet", "build"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Cli::try_parse_from(["folio", "build", "-v", "--no-color"]).unwrap();
        assert!(args.verbose);
        assert!(args.no_color);
    }

    #[test]
    fn test_build_args() {
        let args =
            Cli::try_parse_from(["folio", "build", "-s", "site", "-b", "out", "--clean-only"])
                .unwrap();

        let Command::Build(build) = args.command else {
            panic!("Expected Build command");
        };
        assert_eq!(build.source, Some(PathBuf::from("site")));
        assert_eq!(build.build, Some(PathBuf::from("out")));
        assert!(build.clean_only);
    }

    #[test]
    fn test_build_args_defaults() {
        let args = Cli::try_parse_from(["folio", "build"]).unwrap();

        let Command::Build(build) = args.command else {
            panic!("Expected Build command");
        };
        assert!(build.source.is_none());
        assert!(build.build.is_none());
        assert!(!build.clean_only);
    }

    #[test]
    fn test_dev_args() {
        let args = Cli::try_parse_from([
            "folio",
            "dev",
            "-H",
            "0.0.0.0",
            "-p",
            "9000",
            "--no-reload",
            "--no-browser",
        ])
        .unwrap();

        let Command::Dev(dev) = args.command else {
            panic!("Expected Dev command");
        };
        assert_eq!(dev.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(dev.port, Some(9000));
        assert!(dev.no_reload);
        assert!(dev.no_browser);
    }

    #[test]
    fn test_dev_rejects_port_zero() {
        assert!(Cli::try_parse_from(["folio", "dev", "--port", "0"]).is_err());
    }

    #[test]
    fn test_maintenance_commands_parse() {
        for cmd in ["clean", "status", "info", "check"] {
            assert!(Cli::try_parse_from(["folio", cmd]).is_ok(), "{cmd} should parse");
        }
        let args = Cli::try_parse_from(["folio", "info", "--schema"]).unwrap();
        assert!(matches!(args.command, Command::Info(ref info) if info.schema));
    }

    #[test]
    fn test_removed_commands_are_rejected() {
        for cmd in ["setup", "deploy", "test"] {
            assert!(Cli::try_parse_from(["folio", cmd]).is_err());
        }
    }
}
