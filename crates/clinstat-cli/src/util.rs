use std::{
    fmt,
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::ValueEnum;
use clinstat_table::config::AnalysisConfig;
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Where a command writes its report: stdout, or the `--output` file.
///
/// Every writer consumes the sink and flushes it, so a report is either
/// written completely or the command fails with the target in the message.
#[derive(Debug)]
pub(crate) enum ReportSink {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl ReportSink {
    pub(crate) fn create(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::Stdout(io::stdout().lock()));
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    /// Runs `write` against the sink and flushes it.
    pub(crate) fn write_with<F>(mut self, write: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut Self) -> anyhow::Result<()>,
    {
        let target = self.to_string();
        write(&mut self).with_context(|| format!("Failed to write report to {target}"))?;
        self.flush()
            .with_context(|| format!("Failed to flush report to {target}"))
    }

    /// Pretty-printed JSON followed by a newline.
    pub(crate) fn write_json<T>(self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.write_with(|w| {
            serde_json::to_writer_pretty(&mut *w, value)?;
            writeln!(w)?;
            Ok(())
        })
    }

    /// JSON for [`OutputFormat::Json`], otherwise the plain-text rendering.
    pub(crate) fn emit<T, F>(self, format: OutputFormat, value: &T, text: F) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&mut Self) -> io::Result<()>,
    {
        match format {
            OutputFormat::Json => self.write_json(value),
            OutputFormat::Text => self.write_with(|w| Ok(text(w)?)),
        }
    }
}

impl fmt::Display for ReportSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout(_) => f.write_str("stdout"),
            Self::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

impl Write for ReportSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(writer) => writer.write(buf),
            Self::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(writer) => writer.flush(),
            Self::File { writer, .. } => writer.flush(),
        }
    }
}

/// Deserializes a JSON file; `kind` names the file in error messages.
pub(crate) fn read_json<T>(kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {kind} file: {}", path.display()))
}

/// Reads analysis settings. Settings absent from the file keep their
/// defaults.
pub(crate) fn read_config_file(path: &Path) -> anyhow::Result<AnalysisConfig> {
    read_json("config", path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clinstat_stats::correlation::Method;

    use super::*;

    #[test]
    fn test_read_config_file_with_partial_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"decimal": "comma", "correlation": {"method": "spearman", "alpha": 0.01}}"#,
        )
        .unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.correlation.method, Method::Spearman);
        assert_eq!(config.correlation.alpha, 0.01);
        assert!(config.correlation.use_fdr);
        assert_eq!(config.classifier.sample_size, 12);
    }

    #[test]
    fn test_read_errors_name_the_file_kind() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = read_config_file(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{").unwrap();
        let err = read_config_file(&broken).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_json_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        ReportSink::create(Some(&path))
            .unwrap()
            .write_json(&[1, 2, 3])
            .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(serde_json::from_str::<Vec<i32>>(&text).unwrap(), [1, 2, 3]);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_emit_picks_the_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        for (format, expected) in [
            (OutputFormat::Text, "three values\n"),
            (OutputFormat::Json, "[\n  1,\n  2,\n  3\n]\n"),
        ] {
            ReportSink::create(Some(&path))
                .unwrap()
                .emit(format, &[1, 2, 3], |w| writeln!(w, "three values"))
                .unwrap();
            assert_eq!(fs::read_to_string(&path).unwrap(), expected);
        }
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.json");
        let err = ReportSink::create(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to create output file"));
        assert_eq!(ReportSink::create(None).unwrap().to_string(), "stdout");
    }
}
