use crate::error::{DataManagerError, Result};
use std::path::{Path, PathBuf};

/// CoreNLP release the catalog points at
pub const CORENLP_VERSION: &str = "4.5.10";

/// Reserved identifier for the language-independent models JAR
pub const COMMON_CODE: &str = "common";

/// Catalog entry for a downloadable CoreNLP models JAR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub jar_name: &'static str,
    pub url: &'static str,
}

/// Common models JAR (dcoref dictionaries and shared annotator models)
pub const COMMON_MODELS: ModelInfo = ModelInfo {
    code: COMMON_CODE,
    name: "Common Models",
    jar_name: "stanford-corenlp-4.5.10-models.jar",
    url: "https://repo1.maven.org/maven2/edu/stanford/nlp/stanford-corenlp/4.5.10/stanford-corenlp-4.5.10-models.jar",
};

/// Per-language models JARs, in the order they are listed to users
pub const LANGUAGE_MODELS: &[ModelInfo] = &[
    ModelInfo {
        code: "ar",
        name: "Arabic",
        jar_name: "stanford-corenlp-4.5.10-models-arabic.jar",
        url: "https://repo1.maven.org/maven2/edu/stanford/nlp/stanford-corenlp/4.5.10/stanford-corenlp-4.5.10-models-arabic.jar",
    },
    ModelInfo {
        code: "zh",
        name: "Chinese",
        jar_name: "stanford-corenlp-4.5.10-models-chinese.jar",
        url: "https://repo1.maven.org/maven2/edu/stanford/nlp/stanford-corenlp/4.5.10/stanford-corenlp-4.5.10-models-chinese.jar",
    },
    ModelInfo {
        code: "en",
        name: "English",
        jar_name: "stanford-corenlp-4.5.10-models-english.jar",
        url: "https://repo1.maven.org/maven2/edu/stanford/nlp/stanford-corenlp/4.5.10/stanford-corenlp-4.5.10-models-english.jar",
    },
    ModelInfo {
        code: "fr",
        name: "French",
        jar_name: "stanford-corenlp-4.5.10-models-french.jar",
        url: "https://repo1.maven.org/maven2/edu/stanford/nlp/stanford-corenlp/4.5.10/stanford-corenlp-4.5.10-models-french.jar",
    },
    ModelInfo {
        code: "de",
        name: "German",
        jar_name: "stanford-corenlp-4.5.10-models-german.jar",
        url: "https://repo1.maven.org/maven2/edu/stanford/nlp/stanford-corenlp/4.5.10/stanford-corenlp-4.5.10-models-german.jar",
    },
    ModelInfo {
        code: "hu",
        name: "Hungarian",
        jar_name: "stanford-corenlp-4.5.10-models-hungarian.jar",
        url: "https://repo1.maven.org/maven2/edu/stanford/nlp/stanford-corenlp/4.5.10/stanford-corenlp-4.5.10-models-hungarian.jar",
    },
    ModelInfo {
        code: "it",
        name: "Italian",
        jar_name: "stanford-corenlp-4.5.10-models-italian.jar",
        url: "https://repo1.maven.org/maven2/edu/stanford/nlp/stanford-corenlp/4.5.10/stanford-corenlp-4.5.10-models-italian.jar",
    },
    ModelInfo {
        code: "es",
        name: "Spanish",
        jar_name: "stanford-corenlp-4.5.10-models-spanish.jar",
        url: "https://repo1.maven.org/maven2/edu/stanford/nlp/stanford-corenlp/4.5.10/stanford-corenlp-4.5.10-models-spanish.jar",
    },
];

impl ModelInfo {
    /// Find a language model by code
    #[must_use]
    pub fn find(code: &str) -> Option<&'static Self> {
        LANGUAGE_MODELS.iter().find(|m| m.code == code)
    }

    /// Find a language model, failing with a suggestion for unsupported codes
    pub fn lookup(code: &str) -> Result<&'static Self> {
        Self::find(code).ok_or_else(|| DataManagerError::UnknownLanguage {
            code: code.to_string(),
            hint: Self::suggest(code)
                .map(|s| format!(" (did you mean '{s}'?)"))
                .unwrap_or_default(),
            supported: Self::all_codes().join(", "),
        })
    }

    /// The common models entry
    #[must_use]
    pub fn common() -> &'static Self {
        &COMMON_MODELS
    }

    /// Get all supported language codes
    #[must_use]
    pub fn all_codes() -> Vec<&'static str> {
        LANGUAGE_MODELS.iter().map(|m| m.code).collect()
    }

    /// Find closest code using Levenshtein distance
    ///
    /// Codes are two letters, so anything further than one edit away would
    /// match almost every entry.
    #[must_use]
    pub fn suggest(code: &str) -> Option<&'static str> {
        if code.is_empty() {
            return None;
        }

        let code = code.to_ascii_lowercase();
        LANGUAGE_MODELS
            .iter()
            .map(|m| (m.code, levenshtein_distance(&code, m.code)))
            .min_by_key(|(_, dist)| *dist)
            .filter(|(_, dist)| *dist <= 1)
            .map(|(model_code, _)| model_code)
    }

    /// Where this model's JAR lives inside `target_dir`
    #[must_use]
    pub fn target_path(&self, target_dir: &Path) -> PathBuf {
        target_dir.join(self.jar_name)
    }

    #[must_use]
    pub fn is_common(&self) -> bool {
        self.code == COMMON_CODE
    }
}

/// Calculate Levenshtein distance between two strings
#[allow(clippy::needless_range_loop)]
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for i in 0..=len1 {
        matrix[i][0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for (i, c1) in s1.chars().enumerate() {
        for (j, c2) in s2.chars().enumerate() {
            let cost = usize::from(c1 != c2);
            matrix[i + 1][j + 1] = (matrix[i][j + 1] + 1)
                .min(matrix[i + 1][j] + 1)
                .min(matrix[i][j] + cost);
        }
    }

    matrix[len1][len2]
}
