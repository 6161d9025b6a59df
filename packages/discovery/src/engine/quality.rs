//! Title-based quality classification.
//!
//! The general index is full of camera roll dumps, placeholder uploads,
//! and hash-named files. This module rejects them by title alone, using
//! an ordered table of `(category, pattern)` rules so the rule set is
//! data rather than code and each rule is independently testable.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::item::CandidateItem;

/// What a rejected title looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    /// test/example/sample/placeholder/dummy content
    TestContent,
    /// Camera or scanner auto-names (IMG_1234, DSC_0001, DCIM, ...)
    CameraAutoName,
    /// Generic placeholders (Screenshot, Untitled, cover, null, ...)
    Placeholder,
    /// Timestamp-shaped digit runs (20190412_133755, 20190412133755123)
    TimestampDigits,
    /// Generic numbered names (photo1, image2, file3, ...)
    GenericNumbered,
    /// No word characters at all
    SymbolOnly,
    /// Three characters or fewer
    TooShort,
    /// Nothing but digits
    DigitsOnly,
    /// Hash-like hex strings of 8+ digits
    HexHash,
}

/// One classification rule.
#[derive(Debug)]
pub struct TitleRule {
    pub category: RuleCategory,
    pattern: Regex,
}

impl TitleRule {
    pub fn new(category: RuleCategory, pattern: &str) -> Self {
        Self {
            category,
            pattern: Regex::new(pattern).expect("built-in rule pattern must compile"),
        }
    }

    pub fn matches(&self, title: &str) -> bool {
        self.pattern.is_match(title)
    }
}

lazy_static! {
    /// The built-in rule table, evaluated in order. Rules are independent:
    /// any match rejects the title.
    static ref DEFAULT_RULES: Vec<TitleRule> = vec![
        // Test and filler content
        TitleRule::new(RuleCategory::TestContent, r"(?i)^test"),
        TitleRule::new(RuleCategory::TestContent, r"(?i)test$"),
        TitleRule::new(RuleCategory::TestContent, r"(?i)testimages"),
        TitleRule::new(RuleCategory::TestContent, r"(?i)testfile"),
        TitleRule::new(RuleCategory::TestContent, r"(?i)example"),
        TitleRule::new(RuleCategory::TestContent, r"(?i)sample"),
        TitleRule::new(RuleCategory::TestContent, r"(?i)placeholder"),
        TitleRule::new(RuleCategory::TestContent, r"(?i)dummy"),
        // Camera and scanner auto-names
        TitleRule::new(RuleCategory::CameraAutoName, r"(?i)^IMG_\d+$"),
        TitleRule::new(RuleCategory::CameraAutoName, r"(?i)^IMG-\d+"),
        TitleRule::new(RuleCategory::CameraAutoName, r"(?i)^DSC_?\d+$"),
        TitleRule::new(RuleCategory::CameraAutoName, r"(?i)^DCIM"),
        TitleRule::new(RuleCategory::CameraAutoName, r"^P\d{7,}"),
        TitleRule::new(RuleCategory::CameraAutoName, r"(?i)^MVI_\d+"),
        TitleRule::new(RuleCategory::CameraAutoName, r"(?i)^MOV_\d+"),
        TitleRule::new(RuleCategory::CameraAutoName, r"(?i)^VID_\d+"),
        TitleRule::new(RuleCategory::CameraAutoName, r"(?i)^WA\d+"),
        // Generic placeholders
        TitleRule::new(RuleCategory::Placeholder, r"(?i)^Screenshot"),
        TitleRule::new(RuleCategory::Placeholder, r"(?i)^Untitled"),
        TitleRule::new(RuleCategory::Placeholder, r"(?i)^undefined$"),
        TitleRule::new(RuleCategory::Placeholder, r"(?i)^null$"),
        TitleRule::new(RuleCategory::Placeholder, r"(?i)^cover$"),
        TitleRule::new(RuleCategory::Placeholder, r"(?i)^front$"),
        TitleRule::new(RuleCategory::Placeholder, r"(?i)^back$"),
        TitleRule::new(RuleCategory::Placeholder, r"(?i)^photos$"),
        // Timestamp-shaped names
        TitleRule::new(RuleCategory::TimestampDigits, r"^\d{8}[_\s]\d{6}$"),
        TitleRule::new(RuleCategory::TimestampDigits, r"^\d{14,}$"),
        // Generic numbered names
        TitleRule::new(RuleCategory::GenericNumbered, r"(?i)^photo\d*$"),
        TitleRule::new(RuleCategory::GenericNumbered, r"(?i)^image\d*$"),
        TitleRule::new(RuleCategory::GenericNumbered, r"(?i)^video\d*$"),
        TitleRule::new(RuleCategory::GenericNumbered, r"(?i)^audio\d*$"),
        TitleRule::new(RuleCategory::GenericNumbered, r"(?i)^file\d*$"),
        // Low-quality shapes
        TitleRule::new(RuleCategory::SymbolOnly, r"^\W*$"),
        TitleRule::new(RuleCategory::TooShort, r"^.{1,3}$"),
        TitleRule::new(RuleCategory::DigitsOnly, r"^\d+$"),
        TitleRule::new(RuleCategory::HexHash, r"(?i)^[a-f0-9]{8,}$"),
    ];
}

/// Minimum title length for an item to be worth showing.
const MIN_TITLE_CHARS: usize = 4;

/// Classifies candidate titles as acceptable or noise.
#[derive(Debug, Default)]
pub struct QualityFilter {
    extra_rules: Vec<TitleRule>,
}

impl QualityFilter {
    /// Filter with the built-in rule table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule evaluated after the built-in table.
    pub fn with_rule(mut self, rule: TitleRule) -> Self {
        self.extra_rules.push(rule);
        self
    }

    /// Whether a candidate passes, judged solely on its title.
    pub fn passes(&self, item: &CandidateItem) -> bool {
        self.passes_title(item.title.as_deref().unwrap_or(""))
    }

    /// Whether a title passes.
    pub fn passes_title(&self, title: &str) -> bool {
        self.violation(title).is_none()
    }

    /// The first rule a title violates, if any. Missing or whitespace-only
    /// titles count as [`RuleCategory::SymbolOnly`].
    pub fn violation(&self, title: &str) -> Option<RuleCategory> {
        if title.trim().is_empty() {
            return Some(RuleCategory::SymbolOnly);
        }
        for rule in DEFAULT_RULES.iter().chain(self.extra_rules.iter()) {
            if rule.matches(title) {
                return Some(rule.category);
            }
        }
        if title.chars().count() < MIN_TITLE_CHARS {
            return Some(RuleCategory::TooShort);
        }
        None
    }
}
