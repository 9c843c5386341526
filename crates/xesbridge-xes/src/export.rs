use crate::constants::{DEFAULT_SPLITS, NEGATIVE_FILE, POSITIVE_FILE};
use crate::error::XesError;
use crate::writer::XesWriter;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use xesbridge_log::{EventLog, Partition};

/// Where the exported logs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLayout {
    pub root: PathBuf,
    pub positive_file: String,
    pub negative_file: String,
    pub splits: Vec<String>,
}

impl ExportLayout {
    /// `T_OK.xes` and `T.xes` under `root`, copied into `train/` and `test/`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            positive_file: POSITIVE_FILE.to_string(),
            negative_file: NEGATIVE_FILE.to_string(),
            splits: DEFAULT_SPLITS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_positive_file(mut self, name: impl Into<String>) -> Self {
        self.positive_file = name.into();
        self
    }

    pub fn with_negative_file(mut self, name: impl Into<String>) -> Self {
        self.negative_file = name.into();
        self
    }

    pub fn with_splits<I, S>(mut self, splits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.splits = splits.into_iter().map(Into::into).collect();
        self
    }

    pub fn positive_path(&self) -> PathBuf {
        self.root.join(&self.positive_file)
    }

    pub fn negative_path(&self) -> PathBuf {
        self.root.join(&self.negative_file)
    }

    pub fn split_dirs(&self) -> Vec<PathBuf> {
        self.splits.iter().map(|s| self.root.join(s)).collect()
    }

    /// Both logs target the same file, so the negative log overwrites the positive one.
    pub fn is_collapsed(&self) -> bool {
        self.positive_path() == self.negative_path()
    }

    /// File and split names must each be one plain path component, so every
    /// output lands directly under the root or a split directory.
    pub fn validate(&self) -> Result<(), XesError> {
        let names = [&self.positive_file, &self.negative_file]
            .into_iter()
            .chain(&self.splits);
        for name in names {
            if !is_plain_file_name(name) {
                return Err(XesError::InvalidFileName { name: name.clone() });
            }
        }
        Ok(())
    }
}

/// True for a single normal path component such as `T_OK.xes`; false for
/// `.`, `..`, `./T.xes`, `sub/T.xes`, absolute paths and trailing separators.
pub fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => part == OsStr::new(name),
        _ => false,
    }
}

/// Files produced by one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Logs serialized directly under the root, in write order.
    pub written: Vec<PathBuf>,
    /// Copies placed in the split directories.
    pub copied: Vec<PathBuf>,
}

/// Writes the positive and negative logs and distributes copies.
pub struct Exporter {
    layout: ExportLayout,
    writer: XesWriter,
}

impl Exporter {
    pub fn new(layout: ExportLayout) -> Self {
        Self {
            layout,
            writer: XesWriter::new(),
        }
    }

    pub fn layout(&self) -> &ExportLayout {
        &self.layout
    }

    /// Runs the export. Invalid names or unserializable events fail before
    /// anything is created; a failure part way through leaves earlier files
    /// in place.
    pub fn export(&self, partition: &Partition) -> Result<ExportReport, XesError> {
        self.layout.validate()?;
        self.writer.check(&partition.positive)?;
        self.writer.check(&partition.negative)?;

        let split_dirs = self.prepare_dirs()?;
        let mut report = ExportReport::default();

        let positive = self.layout.positive_path();
        self.write_log(&partition.positive, &positive)?;
        report.written.push(positive);

        if self.layout.is_collapsed() {
            log::warn!(
                "Positive and negative logs share the name {:?}; the negative log replaces the positive one",
                self.layout.negative_file
            );
        }

        let negative = self.layout.negative_path();
        self.write_log(&partition.negative, &negative)?;
        if !report.written.contains(&negative) {
            report.written.push(negative);
        }

        let names = if self.layout.is_collapsed() {
            vec![&self.layout.positive_file]
        } else {
            vec![&self.layout.positive_file, &self.layout.negative_file]
        };

        for dir in &split_dirs {
            for name in &names {
                let from = self.layout.root.join(name);
                let to = dir.join(name);
                fs::copy(&from, &to).map_err(|source| XesError::Copy {
                    from: from.clone(),
                    to: to.clone(),
                    source,
                })?;
                log::info!("Copied {:?} to {:?}", from, to);
                report.copied.push(to);
            }
        }

        Ok(report)
    }

    fn prepare_dirs(&self) -> Result<Vec<PathBuf>, XesError> {
        let dirs = self.layout.split_dirs();
        for dir in std::iter::once(&self.layout.root).chain(&dirs) {
            fs::create_dir_all(dir).map_err(|source| XesError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(dirs)
    }

    fn write_log(&self, log: &EventLog, path: &Path) -> Result<(), XesError> {
        let write_err = |source| XesError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_err)?;
        let mut out = self
            .writer
            .write(log, BufWriter::new(file))
            .map_err(|err| match err {
                XesError::Xml(source) => XesError::Serialize {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            })?;
        out.flush().map_err(write_err)?;

        log::info!("Wrote {} traces to {:?}", log.len(), path);
        Ok(())
    }
}
