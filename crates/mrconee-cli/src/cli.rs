use clap::Parser;

#[derive(Parser)]
#[command(
    name = "mrconee",
    version,
    about = "Inspect DIRAC files containing transformed one-electron integrals",
    long_about = "Inspect DIRAC MRCONEE files.\n\nNotes:\n  - The integer width (4 or 8 bytes) of the producing DIRAC build is inferred\n    automatically from the first record.\n  - The file is read twice from the start, so it must be a regular seekable file."
)]
pub(crate) struct Cli {
    /// Path to the MRCONEE file.
    pub(crate) path: String,

    /// Emit machine-readable JSON instead of human output.
    #[arg(long)]
    pub(crate) json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_json_flag() {
        let cli = Cli::try_parse_from(["mrconee", "MRCONEE", "--json"]).unwrap();
        assert_eq!(cli.path, "MRCONEE");
        assert!(cli.json);

        let cli = Cli::try_parse_from(["mrconee", "calc/MRCONEE"]).unwrap();
        assert!(!cli.json);
    }

    #[test]
    fn requires_a_path() {
        assert!(Cli::try_parse_from(["mrconee"]).is_err());
    }
}
