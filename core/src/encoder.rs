//! Branching encoder.
//!
//! The encoder walks the normalized name left to right. At each position it
//! applies the longest matching rule; when the chosen replacement lists
//! several alternatives every live branch forks once per alternative.
//! After each step the branches are merged by their digit buffer, which
//! keeps the branch count small: buffers are capped at [`MAX_LENGTH`]
//! digits, so branches that only differ past the cap collapse.
use ahash::AHashSet;

use crate::codes::SoundexCodes;
use crate::rules::RuleTable;

/// Length of a Daitch-Mokotoff code.
pub const MAX_LENGTH: usize = 6;

/// One candidate encoding in progress.
///
/// `Copy`, so forking is a plain value copy. `last_token` borrows from the
/// rule table and is used for adjacent-duplicate suppression.
#[derive(Debug, Clone, Copy, Default)]
pub struct Branch<'r> {
    digits: [u8; MAX_LENGTH],
    len: usize,
    last_token: Option<&'r str>,
}

impl<'r> Branch<'r> {
    /// Apply one replacement token, returning the successor branch.
    ///
    /// The token is skipped when the previous token ends with it (`"54"`
    /// followed by `"4"` yields one `4`). `force` overrides the skip; it is
    /// set for m→n and n→m transitions, which never collapse.
    pub fn apply(mut self, token: &'r str, force: bool) -> Self {
        let repeated = self.last_token.is_some_and(|last| last.ends_with(token));
        if force || !repeated {
            self.push_digits(token);
        }
        self.last_token = Some(token);
        self
    }

    fn push_digits(&mut self, token: &str) {
        for b in token.bytes() {
            if self.len == MAX_LENGTH {
                break;
            }
            self.digits[self.len] = b;
            self.len += 1;
        }
    }

    /// Digits accumulated so far.
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    pub fn last_token(&self) -> Option<&'r str> {
        self.last_token
    }

    /// The final code: the buffer right-padded with `0`.
    pub fn finish(&self) -> String {
        let mut code: String = self.digits().iter().map(|&b| char::from(b)).collect();
        while code.len() < MAX_LENGTH {
            code.push('0');
        }
        code
    }

    fn key(&self) -> ([u8; MAX_LENGTH], usize) {
        (self.digits, self.len)
    }
}

impl PartialEq for Branch<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.digits() == other.digits()
    }
}

impl Eq for Branch<'_> {}

/// Live branches in first-seen order, unique by digit buffer.
///
/// When two branches reach the same buffer the first one is kept along with
/// its last token.
#[derive(Debug, Clone, Default)]
pub struct BranchSet<'r> {
    branches: Vec<Branch<'r>>,
    seen: AHashSet<([u8; MAX_LENGTH], usize)>,
}

impl<'r> BranchSet<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single empty branch, the scan's starting state.
    pub fn start() -> Self {
        let mut set = Self::new();
        set.insert(Branch::default());
        set
    }

    /// Insert unless an equal branch is already present.
    pub fn insert(&mut self, branch: Branch<'r>) -> bool {
        if self.seen.insert(branch.key()) {
            self.branches.push(branch);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Branch<'r>> {
        self.branches.iter()
    }

    /// Finalize all branches into padded codes, duplicates removed.
    pub fn finish(&self) -> SoundexCodes {
        self.branches.iter().map(Branch::finish).collect()
    }
}

/// Runs the rule table over normalized input.
#[derive(Debug, Clone, Copy)]
pub struct BranchingEncoder<'r> {
    rules: &'r RuleTable,
}

impl<'r> BranchingEncoder<'r> {
    pub fn new(rules: &'r RuleTable) -> Self {
        Self { rules }
    }

    /// Encode an already normalized name into all of its codes.
    ///
    /// Characters without a rule contribute nothing and do not count as the
    /// previous letter for the m/n check, so `"m-n"` behaves like `"mn"`.
    pub fn encode(&self, normalized: &str) -> SoundexCodes {
        let rules = self.rules;
        let mut branches = BranchSet::start();
        let mut pos = 0usize;
        let mut matched_before = false;
        let mut last_char: Option<char> = None;

        while let Some(ch) = normalized[pos..].chars().next() {
            let context = &normalized[pos..];

            if ch.is_whitespace() {
                pos += ch.len_utf8();
                continue;
            }

            let Some(group) = rules.group(ch) else {
                pos += ch.len_utf8();
                continue;
            };

            let Some(rule) = group.iter().find(|rule| rule.matches(context)) else {
                pos += ch.len_utf8();
                last_char = Some(ch);
                continue;
            };

            let replacement = rule.replacement_for(context, !matched_before);
            let force = matches!((last_char, ch), (Some('m'), 'n') | (Some('n'), 'm'));

            let mut next = BranchSet::new();
            for branch in branches.iter() {
                for token in replacement.alternatives() {
                    next.insert(branch.apply(token, force));
                }
            }

            tracing::trace!(
                pattern = rule.pattern(),
                replacement = replacement.as_str(),
                branches = next.len(),
                "applied rule"
            );

            branches = next;
            pos += rule.pattern_len();
            last_char = Some(ch);
            matched_before = true;
        }

        let codes = branches.finish();
        tracing::debug!(input = normalized, codes = codes.len(), "encoded");
        codes
    }
}
