pub mod error;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::{Digest, Sha256};

pub use error::RunnerError;

/// A single model run: the `input` section of the run document, optionally
/// deserialized into `I`, and the `output` section that decides where
/// results are written.
pub struct Environment<I = ()> {
    input_json: serde_json::Map<String, Value>,
    pub input: Option<I>,
    output: Value,
}

impl Environment {
    pub fn from_json(data: Value) -> Self {
        let input_json = data
            .get("input")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default();

        let output = data.get("output").cloned().unwrap_or(Value::Null);

        Self {
            input_json,
            input: None,
            output,
        }
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, RunnerError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        if raw.trim().is_empty() {
            return Err(RunnerError::EmptyInput);
        }
        let data: Value = serde_json::from_str(&raw)?;
        Ok(Self::from_json(data))
    }

    pub fn from_stdin() -> Result<Self, RunnerError> {
        Self::from_reader(io::stdin().lock())
    }

    /// Reads the same document shape as [`Environment::from_json`], written
    /// as TOML with `[input]` and `[output]` tables.
    pub fn from_toml_str(raw: &str) -> Result<Self, RunnerError> {
        if raw.trim().is_empty() {
            return Err(RunnerError::EmptyInput);
        }
        let table: toml::Value = toml::from_str(raw)?;
        let data = serde_json::to_value(table)?;
        Ok(Self::from_json(data))
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, RunnerError> {
        let raw = fs::read_to_string(path).map_err(|source| RunnerError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded run configuration from {}", path.display());
        Self::from_toml_str(&raw)
    }

    pub fn with_input_type<I: DeserializeOwned>(self) -> Result<Environment<I>, RunnerError> {
        let input_value = Value::Object(self.input_json.clone());
        let input = serde_json::from_value(input_value).map_err(RunnerError::Schema)?;
        Ok(Environment {
            input_json: self.input_json,
            input: Some(input),
            output: self.output,
        })
    }
}

impl<I: DeserializeOwned> Environment<I> {
    /// Reads a JSON run document from `reader` and types its input section.
    pub fn load_from<R: Read>(reader: R) -> Result<Self, RunnerError> {
        Environment::from_reader(reader)?.with_input_type::<I>()
    }

    pub fn load() -> Result<Self, RunnerError> {
        Self::load_from(io::stdin().lock())
    }
}

impl<I: Serialize> Environment<I> {
    /// SHA-256 of the typed input, or of the raw input section when no
    /// input type has been applied. Keys are serialized in sorted order, so
    /// documents that resolve to the same input share a fingerprint.
    pub fn fingerprint(&self) -> Result<String, RunnerError> {
        let canonical = match &self.input {
            Some(input) => serde_json::to_value(input)?,
            None => Value::Object(self.input_json.clone()),
        };
        Ok(hex::encode(Sha256::digest(canonical.to_string().as_bytes())))
    }
}

impl<I> Environment<I> {
    pub fn input_json(&self) -> &serde_json::Map<String, Value> {
        &self.input_json
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        let output = &self.output;

        // Check flat output
        if output.get("spec").and_then(|v| v.as_str()) == Some("filesystem") {
            return output
                .get("dir")
                .and_then(|v| v.as_str())
                .map(PathBuf::from);
        }

        // Check profiled output, preferring the default profile
        let profile = output
            .get("profile")
            .and_then(|v| v.as_object())
            .and_then(|profiles| profiles.get("default").or_else(|| profiles.values().next()))?;
        if profile.get("spec").and_then(|v| v.as_str()) == Some("filesystem") {
            return profile.get("dir").and_then(|v| v.as_str()).map(PathBuf::from);
        }

        None
    }

    pub fn write(&self, filename: &str, data: &[u8]) -> Result<(), RunnerError> {
        if let Some(dir) = self.output_dir() {
            fs::create_dir_all(&dir)?;
            fs::write(dir.join(filename), data)?;
            log::info!("Wrote {}", dir.join(filename).display());
        } else {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
        Ok(())
    }

    /// Writes `records` as CSV with a header row taken from the record's
    /// field names.
    pub fn write_records<S, It>(&self, filename: &str, records: It) -> Result<(), RunnerError>
    where
        S: Serialize,
        It: IntoIterator<Item = S>,
    {
        if let Some(dir) = self.output_dir() {
            fs::create_dir_all(&dir)?;
            let file = fs::File::create(dir.join(filename))?;
            write_csv(csv::Writer::from_writer(file), records)?;
            log::info!("Wrote {}", dir.join(filename).display());
        } else {
            write_csv(csv::Writer::from_writer(io::stdout().lock()), records)?;
        }
        Ok(())
    }
}

fn write_csv<W, S, It>(mut wtr: csv::Writer<W>, records: It) -> Result<(), RunnerError>
where
    W: Write,
    S: Serialize,
    It: IntoIterator<Item = S>,
{
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
