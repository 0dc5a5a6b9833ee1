use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Probability above which a lesion is reported as malignant.
pub const MALIGNANT_THRESHOLD: f64 = 0.5;

/// Kaggle dataset identifier in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSlug(String);

impl DatasetSlug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Component after the last `/`.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn zip_file_name(&self) -> String {
        format!("{}.zip", self.name())
    }

    pub fn zip_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.zip_file_name())
    }

    pub fn extract_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.name())
    }
}

impl fmt::Display for DatasetSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractStats {
    pub entries: usize,
    pub files: usize,
    pub bytes_written: u64,
    pub destination: PathBuf,
}

// S3 通知事件，只保留需要的欄位
#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    pub key: String,
}

impl S3EventRecord {
    pub fn bucket(&self) -> &str {
        &self.s3.bucket.name
    }

    pub fn key(&self) -> &str {
        &self.s3.object.key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Diagnosis {
    Benign,
    Malignant,
}

impl Diagnosis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Benign => "BENIGN",
            Diagnosis::Malignant => "MALIGNANT",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[prob_benign, prob_malignant]` as returned by the model. Not normalised.
///
/// `benign` is `None` when the model's first element was not a number; it is
/// only needed to report a BENIGN confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityPair {
    pub benign: Option<f64>,
    pub malignant: f64,
}

impl ProbabilityPair {
    pub fn new(benign: f64, malignant: f64) -> Self {
        Self {
            benign: Some(benign),
            malignant,
        }
    }

    pub fn malignant_only(malignant: f64) -> Self {
        Self {
            benign: None,
            malignant,
        }
    }

    pub fn diagnosis(&self) -> Diagnosis {
        if self.malignant > MALIGNANT_THRESHOLD {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        }
    }

    /// `None` when the diagnosis is BENIGN but the benign value is unknown.
    pub fn classify(&self) -> Option<(Diagnosis, f64)> {
        match self.diagnosis() {
            Diagnosis::Malignant => Some((Diagnosis::Malignant, self.malignant)),
            Diagnosis::Benign => self.benign.map(|p| (Diagnosis::Benign, p)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub bucket: String,
    pub key: String,
    pub diagnosis: Diagnosis,
    pub confidence: f64,
}

impl Classification {
    pub fn summary_line(&self) -> String {
        format!(
            "✅ Result for {}: {} ({:.2}%)",
            self.key,
            self.diagnosis,
            self.confidence * 100.0
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub status_code: u16,
    pub body: String,
}

impl BatchOutcome {
    /// Body is the JSON encoding of the message string, so it carries its own quotes.
    pub fn completed(last: Diagnosis) -> Self {
        let message = format!("Processing complete. Diagnosis: {}", last);
        Self {
            status_code: 200,
            body: serde_json::Value::String(message).to_string(),
        }
    }
}
