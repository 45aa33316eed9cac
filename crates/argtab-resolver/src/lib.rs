//! Schema-less, daemon-style argument table resolution.
//!
//! This crate is intentionally small and dependency-free so it can be reused by:
//! - the `argtab` CLI (which resolves its own argv through it)
//! - embedding applications that want `-name=value` settings without declaring
//!   a schema up front
//!
//! Nothing is declared ahead of time: population accepts any token vector and
//! never fails, and all interpretation (boolean negation, numeric coercion)
//! happens in the read methods. Every read has a total, default-producing
//! resolution path, so a malformed payload degrades instead of erroring.

pub mod token {
    //! Raw-token normalization.

    /// Split a raw argv token into a normalized option name and optional payload.
    ///
    /// The token is split on the first `=`; the right-hand side (possibly empty)
    /// becomes the payload. The candidate name must start with `-` or the whole
    /// token is positional and `None` is returned. A name starting with `--` has
    /// exactly one dash stripped, so `--name` and `-name` collapse to the same
    /// key.
    ///
    /// The split happens before the dash test, so `foo=-bar` is positional.
    pub fn split_option(raw: &str) -> Option<(String, Option<String>)> {
        let (name, value) = match raw.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (raw, None),
        };
        if !name.starts_with('-') {
            return None;
        }
        let name = match name.strip_prefix("--") {
            Some(rest) => format!("-{rest}"),
            None => name.to_string(),
        };
        Some((name, value))
    }

    /// Return the negated counterpart of an option name: `-foo` becomes `-nofoo`.
    ///
    /// Only the documented prefix form is derived; a name without a leading dash
    /// has no counterpart. Names that merely contain `no` elsewhere are
    /// unrelated.
    pub fn negated(name: &str) -> Option<String> {
        name.strip_prefix('-').map(|rest| format!("-no{rest}"))
    }
}

pub mod table {
    //! The argument table and its read API.

    use std::collections::HashMap;

    use crate::token;

    /// Stored state for a single option name.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Entry {
        /// The option was given bare (`-name`), with no `=value` attached.
        Switch,
        /// The option was given as `-name=value`; the payload may be empty.
        Assigned(String),
    }

    impl Entry {
        /// Boolean interpretation of a single record.
        ///
        /// A bare switch is true; an assigned payload is true unless it is
        /// exactly `"0"` (the empty payload of `-name=` is true).
        pub fn truth(&self) -> bool {
            match self {
                Self::Switch => true,
                Self::Assigned(value) => value != "0",
            }
        }

        /// String view of a single record. A bare switch reads as `""`.
        pub fn text(&self) -> &str {
            match self {
                Self::Switch => "",
                Self::Assigned(value) => value.as_str(),
            }
        }
    }

    /// A queryable mapping of daemon-style option names to values.
    ///
    /// The table is populated once from an argument vector and read many times
    /// afterward. Population takes `&mut self` and every query takes `&self`,
    /// so a reader can never observe a partially populated table.
    ///
    /// Keys are stored case-sensitively with a single leading dash. For point
    /// queries the last occurrence of a name wins; every occurrence stays
    /// retrievable through [`ArgTable::get_all`].
    #[derive(Debug, Clone, Default)]
    pub struct ArgTable {
        entries: HashMap<String, Entry>,
        occurrences: HashMap<String, Vec<Entry>>,
        order: Vec<String>,
    }

    impl ArgTable {
        /// Create an empty table.
        pub fn new() -> Self {
            Self::default()
        }

        /// Build a table directly from an argument vector.
        pub fn from_argv(argv: &[String]) -> Self {
            let mut table = Self::new();
            table.populate(argv);
            table
        }

        /// Replace the table contents from an argument vector.
        ///
        /// The first token is the program name and is skipped. Tokens without a
        /// leading dash are positional and ignored. `--name` and `-name`
        /// collapse to the same key, and later tokens with the same name
        /// overwrite earlier ones regardless of dash count.
        ///
        /// Population never fails: any token is syntactically acceptable, and
        /// semantic interpretation is deferred to the readers.
        pub fn populate(&mut self, argv: &[String]) {
            self.entries.clear();
            self.occurrences.clear();
            self.order.clear();

            for raw in argv.iter().skip(1) {
                let Some((name, value)) = token::split_option(raw) else {
                    continue;
                };
                let entry = match value {
                    Some(value) => Entry::Assigned(value),
                    None => Entry::Switch,
                };
                if !self.entries.contains_key(&name) {
                    self.order.push(name.clone());
                }
                self.entries.insert(name.clone(), entry.clone());
                self.occurrences.entry(name).or_default().push(entry);
            }
        }

        /// Whether the exact name has an entry.
        ///
        /// No negation pairing and no dash normalization applies to the query
        /// string; `-foo` and `-nofoo` are independent keys here.
        pub fn is_set(&self, name: &str) -> bool {
            self.entries.contains_key(name)
        }

        /// Raw record access, for callers that need to distinguish a bare
        /// switch from an explicitly empty payload.
        pub fn get(&self, name: &str) -> Option<&Entry> {
            self.entries.get(name)
        }

        /// Every occurrence of `name`, in argument order. Empty when unset.
        pub fn get_all(&self, name: &str) -> &[Entry] {
            self.occurrences.get(name).map(Vec::as_slice).unwrap_or(&[])
        }

        /// Stored names, in the order they first appeared.
        pub fn names(&self) -> impl Iterator<Item = &str> {
            self.order.iter().map(String::as_str)
        }

        /// Number of distinct stored names.
        pub fn len(&self) -> usize {
            self.entries.len()
        }

        /// Whether the table holds no options at all.
        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }

        /// Resolve a string option.
        ///
        /// An assigned payload is returned verbatim, including the empty
        /// payload of `-name=`. A bare switch reads as `""`. Only an unset
        /// name yields `default`. Negation never applies to string reads.
        pub fn get_str(&self, name: &str, default: &str) -> String {
            match self.entries.get(name) {
                Some(entry) => entry.text().to_string(),
                None => default.to_string(),
            }
        }

        /// Resolve an integer option.
        ///
        /// `default` is returned only when the name is unset. A present entry
        /// is coerced like C `atoi`: optional leading whitespace and sign,
        /// then a digit run, with anything unparsable reading as 0. Presence
        /// with an unparsable payload therefore overrides the default and
        /// collapses to 0 instead of falling back.
        pub fn get_int(&self, name: &str, default: i64) -> i64 {
            match self.entries.get(name) {
                Some(entry) => atoi(entry.text()),
                None => default,
            }
        }

        /// Resolve a boolean option.
        ///
        /// An entry for `name` itself answers first: `"0"` is false, any other
        /// payload or a bare switch is true. Failing that, an entry for the
        /// negated counterpart `-no<name>` answers with its own truth value
        /// inverted, so `-nofoo` reads `-foo` as false and `-nofoo=0` reads it
        /// as true. Only a fully unset pair yields `default`.
        ///
        /// The explicit positive form always wins over the negative form, no
        /// matter which appeared later in the argument vector.
        pub fn get_bool(&self, name: &str, default: bool) -> bool {
            if let Some(entry) = self.entries.get(name) {
                return entry.truth();
            }
            if let Some(negated) = token::negated(name) {
                if let Some(entry) = self.entries.get(&negated) {
                    return !entry.truth();
                }
            }
            default
        }

        /// Install a default payload unless the exact name is already set.
        ///
        /// Returns whether the write happened. Meant for the startup phase,
        /// after population and before readers take over, so subsystems can
        /// seed defaults without clobbering explicit user flags. Only the
        /// exact name is checked; an explicit `-nofoo` does not block a soft
        /// set of `-foo`.
        pub fn soft_set(&mut self, name: &str, value: &str) -> bool {
            if self.entries.contains_key(name) {
                return false;
            }
            self.order.push(name.to_string());
            self.entries
                .insert(name.to_string(), Entry::Assigned(value.to_string()));
            true
        }

        /// Boolean form of [`ArgTable::soft_set`]: stores `"1"` or `"0"`.
        pub fn soft_set_bool(&mut self, name: &str, value: bool) -> bool {
            self.soft_set(name, if value { "1" } else { "0" })
        }
    }

    /// C-style `atoi` on 64 bits: optional leading ASCII whitespace, optional
    /// sign, then a digit run. Anything unparsable is 0; out-of-range runs
    /// saturate.
    fn atoi(payload: &str) -> i64 {
        let rest = payload.trim_start_matches(|c: char| c.is_ascii_whitespace());
        let (negative, digits) = match rest.as_bytes().first() {
            Some(b'-') => (true, &rest[1..]),
            Some(b'+') => (false, &rest[1..]),
            _ => (false, rest),
        };

        // Accumulate negatively so i64::MIN is representable.
        let mut value: i64 = 0;
        for digit in digits.bytes().take_while(u8::is_ascii_digit) {
            value = value
                .saturating_mul(10)
                .saturating_sub(i64::from(digit - b'0'));
        }

        if negative { value } else { value.saturating_neg() }
    }
}
