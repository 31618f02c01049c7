//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.datareport.toml` files. Every setting has a built-in default, so the
//! tool runs without any configuration file at all.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".datareport.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// CSV statistics settings.
    #[serde(default)]
    pub csv: CsvConfig,

    /// Spreadsheet word-count settings.
    #[serde(default)]
    pub excel: ExcelConfig,

    /// JSON grouping settings.
    #[serde(default)]
    pub json: JsonConfig,

    /// Text word-count settings.
    #[serde(default)]
    pub text: TextConfig,
}

/// What a processor does when its input file cannot be read or parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputErrorPolicy {
    /// Log the error and still write a report from an empty result.
    #[default]
    EmptyReport,
    /// Log the error, skip the report, and exit non-zero.
    Fail,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory input files are read from.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory reports are written to.
    #[serde(default = "default_processed_dir")]
    pub processed_dir: PathBuf,

    /// Input error handling.
    #[serde(default)]
    pub on_input_error: InputErrorPolicy,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            processed_dir: default_processed_dir(),
            on_input_error: InputErrorPolicy::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("project_data")
}

fn default_processed_dir() -> PathBuf {
    PathBuf::from("project_processed")
}

fn default_fallback() -> String {
    "Unknown".to_string()
}

/// Numeric statistics over one CSV column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Input file name, relative to the data directory.
    #[serde(default = "default_csv_input")]
    pub input: String,

    /// Report file name, relative to the processed directory.
    #[serde(default = "default_csv_output")]
    pub output: String,

    /// Column holding the numeric values.
    #[serde(default = "default_value_field")]
    pub value_field: String,

    /// Column whose value names the group.
    #[serde(default = "default_group_field")]
    pub group_field: String,

    /// Group used for rows without the group column.
    #[serde(default = "default_fallback")]
    pub fallback_group: String,

    /// Heading used for the value in the report.
    #[serde(default = "default_value_label")]
    pub value_label: String,

    /// Heading used for the group in the report.
    #[serde(default = "default_group_label")]
    pub group_label: String,

    /// Field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            input: default_csv_input(),
            output: default_csv_output(),
            value_field: default_value_field(),
            group_field: default_group_field(),
            fallback_group: default_fallback(),
            value_label: default_value_label(),
            group_label: default_group_label(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_csv_input() -> String {
    "2020_happiness.csv".to_string()
}

fn default_csv_output() -> String {
    "happiness_healthy_life_expectancy_stats.txt".to_string()
}

fn default_value_field() -> String {
    "Healthy life expectancy".to_string()
}

fn default_group_field() -> String {
    "Regional indicator".to_string()
}

fn default_value_label() -> String {
    "Healthy Life Expectancy".to_string()
}

fn default_group_label() -> String {
    "Regional Indicator".to_string()
}

fn default_delimiter() -> char {
    ','
}

/// Word occurrences in spreadsheet columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcelConfig {
    #[serde(default = "default_excel_input")]
    pub input: String,

    #[serde(default = "default_excel_output")]
    pub output: String,

    /// Worksheet name; the first sheet when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,

    /// Column letters to scan.
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,

    /// Word to count, case-insensitively.
    #[serde(default = "default_excel_word")]
    pub word: String,
}

impl Default for ExcelConfig {
    fn default() -> Self {
        Self {
            input: default_excel_input(),
            output: default_excel_output(),
            sheet: None,
            columns: default_columns(),
            word: default_excel_word(),
        }
    }
}

fn default_excel_input() -> String {
    "Feedback.xlsx".to_string()
}

fn default_excel_output() -> String {
    "excel_feedback_github_count.txt".to_string()
}

fn default_columns() -> Vec<String> {
    ["A", "B", "C", "D", "E", "F"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_excel_word() -> String {
    "GitHub".to_string()
}

/// Label listing per group from a JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonConfig {
    #[serde(default = "default_json_input")]
    pub input: String,

    #[serde(default = "default_json_output")]
    pub output: String,

    /// Key of the list of entries.
    #[serde(default = "default_list_key")]
    pub list_key: String,

    /// Entry field naming the group.
    #[serde(default = "default_json_group_field")]
    pub group_field: String,

    /// Entry field listed under each group.
    #[serde(default = "default_label_field")]
    pub label_field: String,

    /// Value used for missing fields.
    #[serde(default = "default_fallback")]
    pub fallback: String,

    /// First line of the report.
    #[serde(default = "default_json_heading")]
    pub heading: String,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            input: default_json_input(),
            output: default_json_output(),
            list_key: default_list_key(),
            group_field: default_json_group_field(),
            label_field: default_label_field(),
            fallback: default_fallback(),
            heading: default_json_heading(),
        }
    }
}

fn default_json_input() -> String {
    "astros.json".to_string()
}

fn default_json_output() -> String {
    "json_astronauts_by_craft.txt".to_string()
}

fn default_list_key() -> String {
    "people".to_string()
}

fn default_json_group_field() -> String {
    "craft".to_string()
}

fn default_label_field() -> String {
    "name".to_string()
}

fn default_json_heading() -> String {
    "Astronauts on each spacecraft".to_string()
}

/// Word occurrences in a plain-text file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(default = "default_text_input")]
    pub input: String,

    #[serde(default = "default_text_output")]
    pub output: String,

    /// Words to count, case-insensitively.
    #[serde(default = "default_words")]
    pub words: Vec<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            input: default_text_input(),
            output: default_text_output(),
            words: default_words(),
        }
    }
}

fn default_text_input() -> String {
    "romeo.txt".to_string()
}

fn default_text_output() -> String {
    "text_romeo_word_count.txt".to_string()
}

fn default_words() -> Vec<String> {
    ["Romeo", "Juliet", "Art", "Love", "Death"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values the CLI explicitly provides override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.data_dir {
            self.general.data_dir = dir.clone();
        }
        if let Some(ref dir) = args.output_dir {
            self.general.processed_dir = dir.clone();
        }
        if args.fail_on_input_error {
            self.general.on_input_error = InputErrorPolicy::Fail;
        }
    }

    /// Check settings that would otherwise only fail halfway through a run.
    pub fn validate(&self) -> Result<()> {
        if !self.csv.delimiter.is_ascii() {
            bail!("CSV delimiter must be a single ASCII character");
        }
        if self.csv.value_field.is_empty() {
            bail!("csv.value_field must not be empty");
        }
        if self.csv.group_field.is_empty() {
            bail!("csv.group_field must not be empty");
        }

        if self.excel.columns.is_empty() {
            bail!("excel.columns must list at least one column");
        }
        for column in &self.excel.columns {
            crate::sources::column_index(column)?;
        }
        if self.excel.word.is_empty() {
            bail!("excel.word must not be empty");
        }

        if self.json.list_key.is_empty() {
            bail!("json.list_key must not be empty");
        }
        if self.json.group_field.is_empty() {
            bail!("json.group_field must not be empty");
        }
        if self.json.label_field.is_empty() {
            bail!("json.label_field must not be empty");
        }

        if self.text.words.is_empty() {
            bail!("text.words must list at least one word");
        }
        if self.text.words.iter().any(|w| w.is_empty()) {
            bail!("text.words must not contain empty words");
        }

        Ok(())
    }

    /// Full path of an input file.
    pub fn input_path(&self, file: &str) -> PathBuf {
        self.general.data_dir.join(file)
    }

    /// Full path of a report file.
    pub fn output_path(&self, file: &str) -> PathBuf {
        self.general.processed_dir.join(file)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.data_dir, PathBuf::from("project_data"));
        assert_eq!(config.general.on_input_error, InputErrorPolicy::EmptyReport);
        assert_eq!(config.csv.value_field, "Healthy life expectancy");
        assert_eq!(config.excel.columns.len(), 6);
        assert_eq!(config.text.words[0], "Romeo");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
processed_dir = "out"
on_input_error = "fail"

[csv]
value_field = "Score"
group_field = "Region"
delimiter = ";"

[excel]
sheet = "Responses"
columns = ["B", "AA"]

[text]
words = ["Hamlet"]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.processed_dir, PathBuf::from("out"));
        assert_eq!(config.general.data_dir, PathBuf::from("project_data"));
        assert_eq!(config.general.on_input_error, InputErrorPolicy::Fail);
        assert_eq!(config.csv.value_field, "Score");
        assert_eq!(config.csv.delimiter, ';');
        assert_eq!(config.csv.fallback_group, "Unknown");
        assert_eq!(config.excel.sheet.as_deref(), Some("Responses"));
        assert_eq!(config.excel.columns, vec!["B", "AA"]);
        assert_eq!(config.excel.word, "GitHub");
        assert_eq!(config.text.words, vec!["Hamlet"]);
        assert_eq!(config.json.list_key, "people");
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = Config::default();
        config.excel.columns = vec!["A".to_string(), "1".to_string()];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.text.words.push(String::new());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.csv.delimiter = '§';
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.csv.group_field = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("csv.group_field"));

        let mut config = Config::default();
        config.json.group_field = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("json.group_field"));

        let mut config = Config::default();
        config.json.label_field = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("json.label_field"));

        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_paths_join_directories() {
        let config = Config::default();
        assert_eq!(
            config.input_path("romeo.txt"),
            PathBuf::from("project_data").join("romeo.txt")
        );
        assert_eq!(
            config.output_path("out.txt"),
            PathBuf::from("project_processed").join("out.txt")
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[csv]"));
        assert!(toml_str.contains("on_input_error = \"empty-report\""));

        let reparsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(reparsed.json.heading, "Astronauts on each spacecraft");
    }
}
