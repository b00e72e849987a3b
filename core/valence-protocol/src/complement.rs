use alloc::string::{String, ToString};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Code of the first preposition; every further preposition adds `PREPOSITION_STEP`.
pub const PREPOSITION_BASE: u32 = 110_000;
pub const PREPOSITION_STEP: u32 = 1_000;

/// Prepositions that may govern a Kprp/Kadv complement, ordered by code.
pub const PREPOSITIONS: [&str; 107] = [
    "à", "ab", "abseits", "abzüglich", "an", "angesichts", "anhand", "anlässlich", "anstatt",
    "anstelle", "auf", "aufgrund", "aus", "ausgenommen", "ausschließlich", "außer", "außerhalb",
    "bar", "bei", "betreffend", "betreffs", "bezüglich", "binnen", "bis", "dank", "diesseits",
    "durch", "einbegriffen", "eingedenk", "einschließlich", "entgegen", "entlang", "entsprechend",
    "exklusive", "fern", "fernab", "für", "gegen", "gegenüber", "gemäß", "gleich", "halber",
    "hinsichtlich", "hinsichts", "hinter", "in", "inbegriffen", "infolge", "inklusive", "inmitten",
    "innerhalb", "je", "jenseits", "kontra", "kraft", "längs", "längsseits", "laut", "links",
    "mangels", "mit", "mitsamt", "mittels", "nach", "nächst", "nahe", "neben", "nebst", "ob",
    "oberhalb", "ohne", "per", "pro", "qua", "rechts", "samt", "seit", "seitens", "seitwärts",
    "statt", "trotz", "über", "um", "unbeschadet", "unfern", "ungeachtet", "unter", "unterhalb",
    "unweit", "vermittels", "vermöge", "via", "von", "vor", "vorbehaltlich", "während", "wegen",
    "wider", "zeit", "zu", "zufolge", "zugunsten", "zuliebe", "zuwider", "zuzüglich", "zwecks",
    "zwischen",
];

/// Labels of the base (non-composite) classes.
fn base_label(code: u32) -> Option<&'static str> {
    let label = match code {
        0 => "Ksubj",
        1 => "Kgen",
        2 => "Kdat",
        3 => "Kakk",
        4 => "Kprp",
        5 => "Kadv",
        6 => "Kprd",
        7 => "Kvrb",
        10 => "SKkon/cj",
        11 => "SKkonj",
        12 => "SKneb",
        13 => "SKobjc",
        14 => "SKrel",
        15 => "SKs",
        16 => "SKsubjc",
        100 => "NA",
        _ => return None,
    };
    Some(label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidClassCode(pub u32);

impl fmt::Display for InvalidClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid complement class code: {}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidClassCode {}

/// A preposition from [`PREPOSITIONS`], identified by its composite-code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Preposition(u32);

impl Preposition {
    pub fn from_code(code: u32) -> Option<Self> {
        if code < PREPOSITION_BASE || code % PREPOSITION_STEP != 0 {
            return None;
        }
        let index = ((code - PREPOSITION_BASE) / PREPOSITION_STEP) as usize;
        (index < PREPOSITIONS.len()).then_some(Self(code))
    }

    /// Exact, case-sensitive lookup of a preposition word.
    pub fn from_word(word: &str) -> Option<Self> {
        PREPOSITIONS
            .iter()
            .position(|p| *p == word)
            .map(|index| Self(PREPOSITION_BASE + index as u32 * PREPOSITION_STEP))
    }

    pub fn code(self) -> u32 {
        self.0
    }

    pub fn word(self) -> &'static str {
        PREPOSITIONS[((self.0 - PREPOSITION_BASE) / PREPOSITION_STEP) as usize]
    }
}

/// Complement class code.
///
/// Either a base class (output classes 0-7, internal clause classes 10-16,
/// `100` for "not applicable") or a composite `preposition + base`, e.g.
/// `155_004` for a Kprp governed by "in".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
#[repr(transparent)]
pub struct ComplementClass(u32);

impl ComplementClass {
    pub const SUBJECT: Self = Self(0);
    pub const GENITIVE: Self = Self(1);
    pub const DATIVE: Self = Self(2);
    pub const ACCUSATIVE: Self = Self(3);
    pub const PREPOSITIONAL: Self = Self(4);
    pub const ADVERBIAL: Self = Self(5);
    pub const PREDICATIVE: Self = Self(6);
    pub const VERBAL: Self = Self(7);
    pub const COORDINATION: Self = Self(10);
    pub const CONJUNCTION: Self = Self(11);
    pub const SUBCLAUSE: Self = Self(12);
    pub const OBJECT_CLAUSE: Self = Self(13);
    pub const RELATIVE_CLAUSE: Self = Self(14);
    pub const SENTENCE: Self = Self(15);
    pub const SUBJECT_CLAUSE: Self = Self(16);
    pub const NOT_APPLICABLE: Self = Self(100);

    /// Codes a signature keeps after the standard cleaning.
    pub const OUTPUT: [Self; 8] = [
        Self::SUBJECT,
        Self::GENITIVE,
        Self::DATIVE,
        Self::ACCUSATIVE,
        Self::PREPOSITIONAL,
        Self::ADVERBIAL,
        Self::PREDICATIVE,
        Self::VERBAL,
    ];

    /// Codes only used while decomposing clauses.
    pub const INTERNAL: [Self; 8] = [
        Self::COORDINATION,
        Self::CONJUNCTION,
        Self::SUBCLAUSE,
        Self::OBJECT_CLAUSE,
        Self::RELATIVE_CLAUSE,
        Self::SENTENCE,
        Self::SUBJECT_CLAUSE,
        Self::NOT_APPLICABLE,
    ];

    pub fn new(code: u32) -> Result<Self, InvalidClassCode> {
        match split_code(code) {
            (base, None) if base_label(base).is_some() => Ok(Self(code)),
            (base, Some(prefix)) if base_label(base).is_some() && Preposition::from_code(prefix).is_some() => {
                Ok(Self(code))
            }
            _ => Err(InvalidClassCode(code)),
        }
    }

    pub fn is_valid(code: u32) -> bool {
        Self::new(code).is_ok()
    }

    /// Initial class of a complement headed by an edge with `label`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "subj" | "subjc" => Self::SUBJECT,
            "objg" => Self::GENITIVE,
            "objd" => Self::DATIVE,
            "obja" | "obja2" => Self::ACCUSATIVE,
            "objp" => Self::PREPOSITIONAL,
            "pp" => Self::ADVERBIAL,
            "pred" => Self::PREDICATIVE,
            "obji" => Self::VERBAL,
            "kon" | "cj" => Self::COORDINATION,
            "konj" => Self::CONJUNCTION,
            "neb" => Self::SUBCLAUSE,
            "objc" => Self::OBJECT_CLAUSE,
            "rel" => Self::RELATIVE_CLAUSE,
            "s" => Self::SENTENCE,
            _ => Self::NOT_APPLICABLE,
        }
    }

    pub fn code(self) -> u32 {
        self.0
    }

    /// The class without its governing preposition.
    pub fn base(self) -> Self {
        Self(split_code(self.0).0)
    }

    pub fn preposition(self) -> Option<Preposition> {
        split_code(self.0).1.and_then(Preposition::from_code)
    }

    /// Composite class `preposition + self`; fails if `self` is composite already.
    pub fn with_preposition(self, preposition: Preposition) -> Result<Self, InvalidClassCode> {
        if self.preposition().is_some() {
            return Err(InvalidClassCode(self.0 + preposition.code()));
        }
        Self::new(preposition.code() + self.0)
    }

    pub fn is_output(self) -> bool {
        self.base().0 <= 7
    }

    /// `"Kadv"` or `"Kadv|mit"`.
    pub fn label(self) -> String {
        let base = base_label(self.base().0).unwrap_or("");
        match self.preposition() {
            Some(preposition) => alloc::format!("{}|{}", base, preposition.word()),
            None => base.to_string(),
        }
    }
}

/// Splits a code into `(base, preposition_prefix)`: anything longer than three
/// digits carries a three-digit preposition prefix (scaled by 1000).
fn split_code(code: u32) -> (u32, Option<u32>) {
    let digits = code.checked_ilog10().unwrap_or(0) + 1;
    if digits <= 3 {
        return (code, None);
    }
    let divisor = 10u32.pow(digits - 3);
    (code % divisor, Some((code / divisor) * PREPOSITION_STEP))
}

impl TryFrom<u32> for ComplementClass {
    type Error = InvalidClassCode;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<ComplementClass> for u32 {
    fn from(class: ComplementClass) -> u32 {
        class.0
    }
}

impl fmt::Display for ComplementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
