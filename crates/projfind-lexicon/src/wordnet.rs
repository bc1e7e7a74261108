//! WordNet dictionaries.
//!
//! Two on-disk layouts are read:
//!
//! * a WNdb directory as shipped by Princeton and by NLTK's `corpora/wordnet`:
//!   `data.{noun,verb,adj,adv}` hold one synset per line, `index.*` map each
//!   lemma to its synset offsets in sense order and the optional `*.exc`
//!   files list irregular inflections;
//! * a flat synset file, one synset per line, lemmas separated by commas or
//!   tabs, `#` starting a comment line:
//!
//! ```text
//! # noun.artifact
//! car,auto,automobile,machine,motorcar
//! data_processing,information_processing
//! ```
//!
//! In both, `_` joins the words of a multi-word lemma. Lookups in a WNdb
//! dictionary also try the base forms of an inflected word ("cars" finds
//! "car"), using the exception lists and the standard detachment rules.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use projfind_core::error::{Error, Result};
use projfind_core::traits::LexicalDictionary;
use projfind_core::types::Synset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [Self::Noun, Self::Verb, Self::Adjective, Self::Adverb];

    /// Suffix of the `data.*`/`index.*` files and prefix of the `*.exc` file.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adj",
            Self::Adverb => "adv",
        }
    }

    fn detachment_rules(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Noun => &[
                ("s", ""), ("ses", "s"), ("ves", "f"), ("xes", "x"), ("zes", "z"),
                ("ches", "ch"), ("shes", "sh"), ("men", "man"), ("ies", "y"),
            ],
            Self::Verb => &[
                ("s", ""), ("ies", "y"), ("es", "e"), ("es", ""),
                ("ed", "e"), ("ed", ""), ("ing", "e"), ("ing", ""),
            ],
            Self::Adjective => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
            Self::Adverb => &[],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WordNetDictionary {
    synsets: Vec<Synset>,
    pos: Vec<Option<PartOfSpeech>>,
    by_lemma: HashMap<String, Vec<usize>>,
    exceptions: HashMap<PartOfSpeech, HashMap<String, Vec<String>>>,
}

/// Lookup key: lowercase, words joined by `_`.
fn lemma_key(word: &str) -> String {
    word.split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::DictionaryUnavailable(format!("cannot read {}: {}", path.display(), e)))
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if path.is_file() { read(path).map(Some) } else { Ok(None) }
}

/// `offset lex_filenum ss_type w_cnt word lex_id [word lex_id...] ... | gloss`,
/// with `w_cnt` in hex. Adjective words may carry a `(a)`, `(p)` or `(ip)` marker.
fn parse_data_line(line: &str) -> Option<(u64, Vec<String>)> {
    if line.starts_with(' ') {
        return None;
    }
    let head = line.split('|').next()?;
    let mut tokens = head.split_whitespace();
    let offset = tokens.next()?.parse().ok()?;
    let _lex_filenum = tokens.next()?;
    let _ss_type = tokens.next()?;
    let w_cnt = usize::from_str_radix(tokens.next()?, 16).ok()?;
    let mut lemmas = Vec::with_capacity(w_cnt);
    for _ in 0..w_cnt {
        let word = tokens.next()?;
        let _lex_id = tokens.next()?;
        let word = word.split_once('(').map_or(word, |(w, _)| w);
        lemmas.push(word.to_string());
    }
    Some((offset, lemmas))
}

/// `lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt synset_offset...`;
/// the offsets are the last `synset_cnt` fields.
fn parse_index_line(line: &str) -> Option<(&str, Vec<u64>)> {
    if line.starts_with(' ') {
        return None;
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let synset_cnt: usize = tokens.get(2)?.parse().ok()?;
    if synset_cnt + 4 > tokens.len() {
        return None;
    }
    let offsets = tokens[tokens.len() - synset_cnt..].iter().map(|t| t.parse().ok()).collect::<Option<Vec<u64>>>()?;
    Some((tokens[0], offsets))
}

impl WordNetDictionary {
    /// Loads a WNdb directory, or a flat synset file when `path` is a file.
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Self::load_wndb(path);
        }
        Ok(Self::parse(&read(path)?))
    }

    pub fn load_wndb(dir: &Path) -> Result<Self> {
        let mut dict = Self::default();
        let mut parts = 0;
        for pos in PartOfSpeech::ALL {
            let stem = pos.file_stem();
            let Some(data) = read_optional(&dir.join(format!("data.{stem}")))? else { continue };
            let index = read_optional(&dir.join(format!("index.{stem}")))?;
            let exceptions = read_optional(&dir.join(format!("{stem}.exc")))?;
            dict.add_part_of_speech(pos, &data, index.as_deref(), exceptions.as_deref());
            parts += 1;
        }
        if parts == 0 {
            return Err(Error::DictionaryUnavailable(format!("no data.* files in {}", dir.display())));
        }
        debug!(dir = %dir.display(), parts, synsets = dict.len(), lemmas = dict.by_lemma.len(), "loaded WNdb dictionary");
        Ok(dict)
    }

    /// Adds one part of speech from the contents of its `data.*`, `index.*`
    /// and `*.exc` files. Without an index, lemmas are taken from the data lines.
    pub fn add_part_of_speech(&mut self, pos: PartOfSpeech, data: &str, index: Option<&str>, exceptions: Option<&str>) {
        let mut by_offset = HashMap::new();
        for (offset, lemmas) in data.lines().filter_map(parse_data_line) {
            let idx = self.synsets.len();
            self.synsets.push(Synset::new(lemmas));
            self.pos.push(Some(pos));
            by_offset.insert(offset, idx);
        }

        match index {
            Some(index) => {
                for (lemma, offsets) in index.lines().filter_map(parse_index_line) {
                    for offset in offsets {
                        match by_offset.get(&offset) {
                            Some(&idx) => self.link(lemma, idx),
                            None => warn!(lemma, offset, pos = pos.file_stem(), "index entry points at a missing synset"),
                        }
                    }
                }
            }
            None => {
                let mut ids: Vec<usize> = by_offset.into_values().collect();
                ids.sort_unstable();
                for idx in ids {
                    for lemma in self.synsets[idx].lemmas.clone() {
                        self.link(&lemma, idx);
                    }
                }
            }
        }

        if let Some(exceptions) = exceptions {
            let table = self.exceptions.entry(pos).or_default();
            for line in exceptions.lines() {
                let mut words = line.split_whitespace();
                let Some(inflected) = words.next() else { continue };
                table.entry(lemma_key(inflected)).or_default().extend(words.map(lemma_key));
            }
        }
    }

    pub fn parse(content: &str) -> Self {
        let synsets = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| Synset::new(line.split([',', '\t']).map(str::trim).filter(|l| !l.is_empty())))
            .filter(|s| !s.lemmas.is_empty());
        Self::from_synsets(synsets)
    }

    pub fn from_synsets<I: IntoIterator<Item = Synset>>(synsets: I) -> Self {
        let mut dict = Self::default();
        for synset in synsets {
            let idx = dict.synsets.len();
            for lemma in &synset.lemmas {
                dict.link(lemma, idx);
            }
            dict.synsets.push(synset);
            dict.pos.push(None);
        }
        dict
    }

    fn link(&mut self, lemma: &str, idx: usize) {
        let slots = self.by_lemma.entry(lemma_key(lemma)).or_default();
        if !slots.contains(&idx) { slots.push(idx); }
    }

    /// Candidate base forms of `key` for one part of speech: exception list
    /// entries first, then every detachment rule whose suffix applies.
    fn base_forms(&self, key: &str, pos: PartOfSpeech) -> Vec<String> {
        let mut forms = self.exceptions.get(&pos).and_then(|t| t.get(key)).cloned().unwrap_or_default();
        for (suffix, ending) in pos.detachment_rules() {
            if let Some(stem) = key.strip_suffix(suffix).filter(|s| !s.is_empty()) {
                forms.push(format!("{stem}{ending}"));
            }
        }
        forms
    }

    pub fn len(&self) -> usize { self.synsets.len() }

    pub fn is_empty(&self) -> bool { self.synsets.is_empty() }
}

impl LexicalDictionary for WordNetDictionary {
    fn synsets_of(&self, word: &str) -> Result<Vec<Synset>> {
        let key = lemma_key(word);
        let mut ids = self.by_lemma.get(&key).cloned().unwrap_or_default();
        for pos in PartOfSpeech::ALL {
            for form in self.base_forms(&key, pos) {
                for &idx in self.by_lemma.get(&form).into_iter().flatten() {
                    if self.pos[idx] == Some(pos) && !ids.contains(&idx) {
                        ids.push(idx);
                    }
                }
            }
        }
        Ok(ids.into_iter().map(|i| self.synsets[i].clone()).collect())
    }
}
