use crate::models::{CalendarEvent, EventForm, EventKind};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in required fields";

/// Events never leave this machine; the content API has no calendar.
pub struct CalendarStore {
    path: PathBuf,
    events: RwLock<Vec<CalendarEvent>>,
}

fn seed_events() -> Vec<CalendarEvent> {
    let date = |d| NaiveDate::from_ymd_opt(2024, 12, d).unwrap_or_default();
    vec![
        CalendarEvent {
            id: 1,
            title: "Research Review Meeting".to_string(),
            description: "Monthly review of research progress".to_string(),
            date: date(15),
            time: "10:00 AM".to_string(),
            location: Some("Conference Room A".to_string()),
            kind: EventKind::Meeting,
        },
        CalendarEvent {
            id: 2,
            title: "Document Submission Deadline".to_string(),
            description: "Final deadline for Q4 research documents".to_string(),
            date: date(20),
            time: "5:00 PM".to_string(),
            location: None,
            kind: EventKind::Deadline,
        },
        CalendarEvent {
            id: 3,
            title: "IJG Annual Conference".to_string(),
            description: "Annual research conference and networking event".to_string(),
            date: date(25),
            time: "9:00 AM".to_string(),
            location: Some("Main Auditorium".to_string()),
            kind: EventKind::Event,
        },
    ]
}

impl CalendarStore {
    /// Opens the store at `path`, seeding the sample events when the file
    /// does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let events = if Path::new(&path).exists() {
            let data = fs::read_to_string(&path).context("Failed to read calendar file")?;
            serde_json::from_str(&data).context("Failed to parse calendar file")?
        } else {
            seed_events()
        };

        Ok(Self {
            path,
            events: RwLock::new(events),
        })
    }

    pub async fn list(&self) -> Vec<CalendarEvent> {
        let mut events = self.events.read().await.clone();
        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        events
    }

    pub async fn events_on(&self, date: NaiveDate) -> Vec<CalendarEvent> {
        let events = self.events.read().await;
        events.iter().filter(|e| e.date == date).cloned().collect()
    }

    pub async fn add(&self, form: EventForm) -> Result<CalendarEvent> {
        if form.title.trim().is_empty() || form.time.trim().is_empty() {
            bail!(REQUIRED_FIELDS_MESSAGE);
        }

        let mut events = self.events.write().await;
        let id = events.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let event = CalendarEvent {
            id,
            title: form.title,
            description: form.description,
            date: form.date,
            time: form.time,
            location: form.location.filter(|l| !l.trim().is_empty()),
            kind: form.kind,
        };
        events.push(event.clone());
        self.save_to_disk(&events)?;
        Ok(event)
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            bail!("Event not found: {}", id);
        }
        self.save_to_disk(&events)?;
        Ok(())
    }

    fn save_to_disk(&self, events: &[CalendarEvent]) -> Result<()> {
        let json = serde_json::to_string_pretty(events).context("Failed to serialize events")?;
        fs::write(&self.path, json).context("Failed to write to calendar file")?;
        Ok(())
    }
}
