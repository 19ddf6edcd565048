//! Task data model.
//!
//! A task lives in one of three lanes (`todo`, `in-progress`, `done`) and
//! carries priority, tags, an optional due date and an ordered list of
//! subtasks. Field names serialize in camelCase so data files and export
//! files share one shape.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Workflow lane a task occupies.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Status::Todo),
            "in-progress" | "in_progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(Error::InvalidArgument(format!(
                "invalid status '{other}': must be todo, in-progress, or done"
            ))),
        }
    }
}

/// Task priority. Sorting ranks urgent first, low last.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    /// Fixed sort rank: urgent=0, high=1, normal=2, low=3.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Normal => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(Error::InvalidArgument(format!(
                "invalid priority '{other}': must be low, normal, high, or urgent"
            ))),
        }
    }
}

/// One entry in a task's checklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
        }
    }
}

/// A single trackable work item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "de_opt_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Subtask>,
}

/// Caller-supplied fields for building a new task. Everything but the
/// title is defaulted.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Build a fresh task with a generated id and `created_at = now`.
    pub fn create(fields: NewTask) -> Self {
        let mut task = Self {
            id: Uuid::new_v4().to_string(),
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: fields.priority,
            tags: dedup_tags(fields.tags),
            due_date: fields.due_date,
            created_at: Utc::now(),
            completed_at: None,
            subtasks: Vec::new(),
        };
        task.normalize_completion();
        task
    }

    /// Enforce `completed_at` is set iff the task is done. Entering `done`
    /// stamps the current time; leaving it clears the stamp.
    pub fn normalize_completion(&mut self) {
        match self.status {
            Status::Done => {
                if self.completed_at.is_none() {
                    self.completed_at = Some(Utc::now());
                }
            }
            _ => self.completed_at = None,
        }
    }

    /// Add a tag, keeping the set deduplicated in insertion order.
    /// Returns false if the tag was already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.tags.iter().any(|existing| existing == &tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove a tag. Returns false if it was not present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() < before
    }

    /// A task is overdue when its due date is before `today` and it is
    /// not done.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && self.status != Status::Done,
            None => false,
        }
    }

    /// Checklist completion as a whole percentage (0 for an empty list).
    pub fn subtask_progress(&self) -> u8 {
        if self.subtasks.is_empty() {
            return 0;
        }
        let completed = self.subtasks.iter().filter(|s| s.completed).count();
        ((completed * 100) as f64 / self.subtasks.len() as f64).round() as u8
    }
}

pub(crate) fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Accept a missing field, `null`, or an empty string as "no due date".
/// Data files written by older exporters carry `"dueDate": ""`.
pub(crate) fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Sort key for the displayed projection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Date,
    DueDate,
    Priority,
    Title,
}

impl FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "").as_str() {
            "date" => Ok(SortBy::Date),
            "duedate" | "due" => Ok(SortBy::DueDate),
            "priority" => Ok(SortBy::Priority),
            "title" => Ok(SortBy::Title),
            other => Err(Error::InvalidArgument(format!(
                "invalid sort key '{other}': must be date, due-date, priority, or title"
            ))),
        }
    }
}

/// Status criterion: everything, or one lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            Ok(StatusFilter::Only(s.parse()?))
        }
    }
}

/// Priority criterion: everything, or one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl FromStr for PriorityFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(PriorityFilter::All)
        } else {
            Ok(PriorityFilter::Only(s.parse()?))
        }
    }
}

/// The transient query applied to compute the displayed order. Never
/// persisted with the tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub sort_by: SortBy,
}

/// Partial update for `FilterCriteria`: fields left `None` are retained.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
    pub priority: Option<PriorityFilter>,
    pub sort_by: Option<SortBy>,
}

impl FilterCriteria {
    /// Shallow merge of a partial update.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(search) = update.search {
            self.search = search;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(sort_by) = update.sort_by {
            self.sort_by = sort_by;
        }
    }
}
