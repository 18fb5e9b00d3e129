//! Constituent labels and part-of-speech tags.
//!
//! Only the labels the rewrite rules inspect are modelled as variants. Every
//! other label is kept verbatim in [`NodeKind::Label`] so serialization
//! reproduces the input exactly.

/// Phrase-level constituent labels, plus the two synthetic labels the
/// rewriter introduces (`A` for the answer marker, `BY` for the "by" prefix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phrase {
    Root,
    S,
    Sq,
    Sbar,
    Sbarq,
    Frag,
    Np,
    Vp,
    Pp,
    Adjp,
    Advp,
    Prt,
    Whnp,
    Whadjp,
    Whadvp,
    Whpp,
    /// Synthetic wrapper around the blank marker.
    Answer,
    /// Synthetic wrapper around the word "by".
    By,
}

impl Phrase {
    pub fn from_label(label: &str) -> Option<Self> {
        let phrase = match label {
            "ROOT" => Phrase::Root,
            "S" => Phrase::S,
            "SQ" => Phrase::Sq,
            "SBAR" => Phrase::Sbar,
            "SBARQ" => Phrase::Sbarq,
            "FRAG" => Phrase::Frag,
            "NP" => Phrase::Np,
            "VP" => Phrase::Vp,
            "PP" => Phrase::Pp,
            "ADJP" => Phrase::Adjp,
            "ADVP" => Phrase::Advp,
            "PRT" => Phrase::Prt,
            "WHNP" => Phrase::Whnp,
            "WHADJP" => Phrase::Whadjp,
            "WHADVP" => Phrase::Whadvp,
            "WHPP" => Phrase::Whpp,
            "A" => Phrase::Answer,
            "BY" => Phrase::By,
            _ => return None,
        };
        Some(phrase)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phrase::Root => "ROOT",
            Phrase::S => "S",
            Phrase::Sq => "SQ",
            Phrase::Sbar => "SBAR",
            Phrase::Sbarq => "SBARQ",
            Phrase::Frag => "FRAG",
            Phrase::Np => "NP",
            Phrase::Vp => "VP",
            Phrase::Pp => "PP",
            Phrase::Adjp => "ADJP",
            Phrase::Advp => "ADVP",
            Phrase::Prt => "PRT",
            Phrase::Whnp => "WHNP",
            Phrase::Whadjp => "WHADJP",
            Phrase::Whadvp => "WHADVP",
            Phrase::Whpp => "WHPP",
            Phrase::Answer => "A",
            Phrase::By => "BY",
        }
    }

    /// Whether this is one of the four interrogative phrase labels.
    pub fn is_wh(self) -> bool {
        matches!(
            self,
            Phrase::Whnp | Phrase::Whadjp | Phrase::Whadvp | Phrase::Whpp
        )
    }
}

/// Preterminal part-of-speech tags the rules care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Vb,
    Vbd,
    Vbg,
    Vbn,
    Vbp,
    Vbz,
    Md,
    Rb,
    In,
    To,
    Wdt,
    Nn,
    Comma,
    Period,
}

impl PosTag {
    pub fn from_label(label: &str) -> Option<Self> {
        let tag = match label {
            "VB" => PosTag::Vb,
            "VBD" => PosTag::Vbd,
            "VBG" => PosTag::Vbg,
            "VBN" => PosTag::Vbn,
            "VBP" => PosTag::Vbp,
            "VBZ" => PosTag::Vbz,
            "MD" => PosTag::Md,
            "RB" => PosTag::Rb,
            "IN" => PosTag::In,
            "TO" => PosTag::To,
            "WDT" => PosTag::Wdt,
            "NN" => PosTag::Nn,
            "," => PosTag::Comma,
            "." => PosTag::Period,
            _ => return None,
        };
        Some(tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PosTag::Vb => "VB",
            PosTag::Vbd => "VBD",
            PosTag::Vbg => "VBG",
            PosTag::Vbn => "VBN",
            PosTag::Vbp => "VBP",
            PosTag::Vbz => "VBZ",
            PosTag::Md => "MD",
            PosTag::Rb => "RB",
            PosTag::In => "IN",
            PosTag::To => "TO",
            PosTag::Wdt => "WDT",
            PosTag::Nn => "NN",
            PosTag::Comma => ",",
            PosTag::Period => ".",
        }
    }

    /// Verb and modal tags (`VB*`, `MD`).
    pub fn is_verb(self) -> bool {
        matches!(
            self,
            PosTag::Vb
                | PosTag::Vbd
                | PosTag::Vbg
                | PosTag::Vbn
                | PosTag::Vbp
                | PosTag::Vbz
                | PosTag::Md
        )
    }
}

/// What a node holds: a classified label, an unmodelled label, or a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Phrase(Phrase),
    Tag(PosTag),
    /// Any label outside the modelled sets, kept verbatim.
    Label(String),
    /// A lower-cased surface word (leaf).
    Word(String),
}

impl NodeKind {
    /// Classify a constituent label.
    pub fn from_label(label: &str) -> Self {
        if let Some(phrase) = Phrase::from_label(label) {
            NodeKind::Phrase(phrase)
        } else if let Some(tag) = PosTag::from_label(label) {
            NodeKind::Tag(tag)
        } else {
            NodeKind::Label(label.to_string())
        }
    }

    /// The label or word text as it appears in bracket notation.
    pub fn token(&self) -> &str {
        match self {
            NodeKind::Phrase(p) => p.as_str(),
            NodeKind::Tag(t) => t.as_str(),
            NodeKind::Label(l) => l,
            NodeKind::Word(w) => w,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, NodeKind::Word(_))
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
