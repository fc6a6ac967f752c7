use log::debug;
use std::collections::BTreeMap;
use std::fmt;

use super::experience::MAX_VIRTUAL_LEVEL;
use crate::errors::{OsrsError, Result};
use crate::models::{
    Boss, BountyType, ClueTier, ExtendedStats, Minigame, PlayerStats, ScoreRecord, Skill,
    SkillRecord, TotalRecord,
};

/// The hiscores response: one record per line, fields separated by commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFeed {
    lines: Vec<String>,
}

impl RawFeed {
    /// Splits `text` into record lines.
    ///
    /// A feed that arrives as a single comma-delimited line is cut back into
    /// records using the field counts of [`FEED_SCHEMA`]; anything past the
    /// schema is grouped in pairs.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        match lines.as_slice() {
            [blob] if blob.split(',').count() > RecordShape::Triple.width() => Self {
                lines: regroup(blob),
            },
            _ => Self { lines },
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn regroup(blob: &str) -> Vec<String> {
    let tokens: Vec<&str> = blob.trim_end_matches(',').split(',').map(str::trim).collect();
    let widths = FEED_SCHEMA
        .iter()
        .flat_map(|entry| std::iter::repeat(entry.shape.width()).take(entry.lines))
        .chain(std::iter::repeat(RecordShape::Pair.width()));

    let mut rest = tokens.as_slice();
    let mut lines = Vec::new();
    for width in widths {
        if rest.is_empty() {
            break;
        }
        let (line, tail) = rest.split_at(width.min(rest.len()));
        lines.push(line.join(","));
        rest = tail;
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Total,
    Skills,
    Reserved,
    Bounty,
    Clues,
    Minigames,
    Bosses,
}

impl Section {
    pub fn is_extended(&self) -> bool {
        !matches!(self, Section::Total | Section::Skills)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Total => "total",
            Section::Skills => "skills",
            Section::Reserved => "reserved",
            Section::Bounty => "bounty hunter",
            Section::Clues => "clues",
            Section::Minigames => "minigames",
            Section::Bosses => "bosses",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// rank, level, experience
    Triple,
    /// rank, score
    Pair,
    /// Consumed without being read.
    Skipped,
}

impl RecordShape {
    /// Field count every line of this shape must have, if it is checked.
    pub fn arity(&self) -> Option<usize> {
        match self {
            RecordShape::Triple => Some(3),
            RecordShape::Pair => Some(2),
            RecordShape::Skipped => None,
        }
    }

    /// Fields one record takes up in a single-line feed. The skipped line is
    /// a rank/score pair upstream.
    fn width(&self) -> usize {
        self.arity().unwrap_or(2)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SchemaEntry {
    pub section: Section,
    pub shape: RecordShape,
    pub lines: usize,
}

impl SchemaEntry {
    const fn new(section: Section, shape: RecordShape, lines: usize) -> Self {
        Self { section, shape, lines }
    }
}

/// Feed layout in upstream order. The feed carries no names, so this table is
/// the only thing tying a line to a category.
pub const FEED_SCHEMA: &[SchemaEntry] = &[
    SchemaEntry::new(Section::Total, RecordShape::Triple, 1),
    SchemaEntry::new(Section::Skills, RecordShape::Triple, Skill::ALL.len()),
    // Unused by this client; the upstream does not document it.
    SchemaEntry::new(Section::Reserved, RecordShape::Skipped, 1),
    SchemaEntry::new(Section::Bounty, RecordShape::Pair, BountyType::ALL.len()),
    SchemaEntry::new(Section::Clues, RecordShape::Pair, ClueTier::ALL.len()),
    SchemaEntry::new(Section::Minigames, RecordShape::Pair, Minigame::ALL.len()),
    SchemaEntry::new(Section::Bosses, RecordShape::Pair, Boss::ALL.len()),
];

fn expected_lines(extended_categories: bool) -> usize {
    schema(extended_categories).map(|entry| entry.lines).sum()
}

fn schema(extended_categories: bool) -> impl Iterator<Item = &'static SchemaEntry> {
    FEED_SCHEMA
        .iter()
        .filter(move |entry| extended_categories || !entry.section.is_extended())
}

struct FeedCursor<'a> {
    lines: &'a [String],
    position: usize,
}

impl<'a> FeedCursor<'a> {
    fn new(lines: &'a [String]) -> Self {
        Self { lines, position: 0 }
    }

    fn remaining(&self) -> usize {
        self.lines.len() - self.position
    }

    /// Claims the lines of one schema entry, failing if the feed ends early.
    fn take(&mut self, entry: &SchemaEntry) -> Result<(usize, &'a [String])> {
        if self.remaining() < entry.lines {
            return Err(OsrsError::MalformedFeed(format!(
                "{} section needs {} lines at line {}, only {} left",
                entry.section,
                entry.lines,
                self.position + 1,
                self.remaining()
            )));
        }
        let lines = self.lines;
        let start = self.position;
        self.position += entry.lines;
        Ok((start, &lines[start..self.position]))
    }
}

/// Splits one line into integers, checking the field count against the
/// entry's record shape.
fn read_record(line: &str, line_index: usize, entry: &SchemaEntry) -> Result<Vec<i64>> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if let Some(arity) = entry.shape.arity() {
        if fields.len() != arity {
            return Err(OsrsError::MalformedFeed(format!(
                "{} line {}: expected {} fields, found {} in '{}'",
                entry.section,
                line_index + 1,
                arity,
                fields.len(),
                line
            )));
        }
    }

    fields
        .iter()
        .map(|field| {
            field.parse::<i64>().map_err(|_| {
                OsrsError::MalformedFeed(format!(
                    "{} line {}: '{}' is not an integer",
                    entry.section,
                    line_index + 1,
                    field
                ))
            })
        })
        .collect()
}

fn shaped<const N: usize>(
    values: Vec<i64>,
    line_index: usize,
    section: Section,
) -> Result<[i64; N]> {
    values.try_into().map_err(|values: Vec<i64>| {
        OsrsError::MalformedFeed(format!(
            "{} line {}: {} fields do not form a {}-field record",
            section,
            line_index + 1,
            values.len(),
            N
        ))
    })
}

fn read_skill(line: &str, line_index: usize, entry: &SchemaEntry) -> Result<SkillRecord> {
    let values = read_record(line, line_index, entry)?;
    let [rank, level, experience] = shaped::<3>(values, line_index, entry.section)?;
    if !(-1..=MAX_VIRTUAL_LEVEL).contains(&level) {
        return Err(OsrsError::MalformedFeed(format!(
            "{} line {}: level {} is outside -1..={}",
            entry.section,
            line_index + 1,
            level,
            MAX_VIRTUAL_LEVEL
        )));
    }
    Ok(SkillRecord::new(rank, level, experience))
}

fn decode_scores<K: Copy + Ord>(
    catalogue: &[K],
    entry: &SchemaEntry,
    start: usize,
    lines: &[String],
) -> Result<BTreeMap<K, ScoreRecord>> {
    catalogue
        .iter()
        .zip(lines)
        .enumerate()
        .map(|(offset, (key, line))| {
            let values = read_record(line, start + offset, entry)?;
            let [rank, score] = shaped::<2>(values, start + offset, entry.section)?;
            Ok((*key, ScoreRecord::new(rank, score)))
        })
        .collect()
}

#[derive(Default)]
struct StatsBuilder {
    total: Option<TotalRecord>,
    skills: BTreeMap<Skill, SkillRecord>,
    bounty: BTreeMap<BountyType, ScoreRecord>,
    clues: BTreeMap<ClueTier, ScoreRecord>,
    minigames: BTreeMap<Minigame, ScoreRecord>,
    bosses: BTreeMap<Boss, ScoreRecord>,
}

impl StatsBuilder {
    fn decode(&mut self, entry: &SchemaEntry, start: usize, lines: &[String]) -> Result<()> {
        if entry.shape == RecordShape::Skipped {
            return Ok(());
        }

        match entry.section {
            Section::Total => {
                let values = read_record(&lines[0], start, entry)?;
                let [rank, level, experience] = shaped::<3>(values, start, entry.section)?;
                self.total = Some(TotalRecord { rank, level, experience });
            }
            Section::Skills => {
                for (offset, (skill, line)) in Skill::ALL.iter().zip(lines).enumerate() {
                    self.skills.insert(*skill, read_skill(line, start + offset, entry)?);
                }
            }
            Section::Reserved => {}
            Section::Bounty => {
                self.bounty = decode_scores(BountyType::ALL, entry, start, lines)?;
            }
            Section::Clues => {
                self.clues = decode_scores(ClueTier::ALL, entry, start, lines)?;
            }
            Section::Minigames => {
                self.minigames = decode_scores(Minigame::ALL, entry, start, lines)?;
            }
            Section::Bosses => {
                self.bosses = decode_scores(Boss::ALL, entry, start, lines)?;
            }
        }
        Ok(())
    }

    fn build(self, extended_categories: bool) -> Result<PlayerStats> {
        let total = self
            .total
            .ok_or_else(|| OsrsError::MalformedFeed("total record missing".to_string()))?;

        let extended = if extended_categories {
            Some(ExtendedStats {
                bounty: self.bounty,
                clues: self.clues,
                minigames: self.minigames,
                bosses: self.bosses,
            })
        } else {
            None
        };

        Ok(PlayerStats {
            total,
            skills: self.skills,
            extended,
        })
    }
}

/// Decodes a hiscores feed.
///
/// With `extended_categories` unset only the total and skill sections are read,
/// matching the older skills-only feed. Lines past the end of the schema are
/// ignored. Any missing line, wrong field count, non-numeric field or skill
/// level outside `-1..=MAX_VIRTUAL_LEVEL` fails the whole parse.
pub fn parse(feed: &RawFeed, extended_categories: bool) -> Result<PlayerStats> {
    let mut cursor = FeedCursor::new(feed.lines());
    let mut builder = StatsBuilder::default();

    for entry in schema(extended_categories) {
        let (start, lines) = cursor.take(entry)?;
        builder.decode(entry, start, lines)?;
    }

    if cursor.remaining() > 0 {
        debug!(
            "ignoring {} feed lines past the {} known ones",
            cursor.remaining(),
            expected_lines(extended_categories)
        );
    }

    builder.build(extended_categories)
}

pub fn parse_text(text: &str, extended_categories: bool) -> Result<PlayerStats> {
    parse(&RawFeed::from_text(text), extended_categories)
}
