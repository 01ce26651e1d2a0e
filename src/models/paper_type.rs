use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperType {
    TestLiner,
    Float,
    WhiteTopTestLiner,
}

impl PaperType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PaperType::TestLiner => "test_liner",
            PaperType::Float => "float",
            PaperType::WhiteTopTestLiner => "white_top_test_liner",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "test_liner" => Some(PaperType::TestLiner),
            "float" => Some(PaperType::Float),
            "white_top_test_liner" => Some(PaperType::WhiteTopTestLiner),
            _ => None,
        }
    }

    /// Accepts the DB name or a short code (tl, f, wt).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().replace('-', "_").as_str() {
            "tl" => Some(PaperType::TestLiner),
            "f" => Some(PaperType::Float),
            "wt" | "wttl" => Some(PaperType::WhiteTopTestLiner),
            other => PaperType::from_db_str(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaperType::TestLiner => "Test liner",
            PaperType::Float => "Float",
            PaperType::WhiteTopTestLiner => "White-top test liner",
        }
    }
}

/// Cross-machine grammage variation class (±1g … more than 5g).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile(u8);

impl Profile {
    pub fn new(level: u8) -> Option<Self> {
        (1..=5).contains(&level).then_some(Profile(level))
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    pub fn to_db_str(&self) -> String {
        self.0.to_string()
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        s.trim().parse::<u8>().ok().and_then(Profile::new)
    }

    pub fn label(&self) -> String {
        if self.0 == 5 {
            "more than 5g across the sheet".to_string()
        } else {
            format!("±{}g", self.0)
        }
    }
}
