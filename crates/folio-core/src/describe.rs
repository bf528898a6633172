use std::fmt;
use std::sync::LazyLock;

use chrono::{
  DateTime,
  Utc
};
use regex::Regex;

use crate::event::{
  ActivityEvent,
  EventPayload
};

static WORD_BOUNDARY: LazyLock<Regex> =
  LazyLock::new(|| {
    Regex::new("([a-z])([A-Z])")
      .expect("static regex")
  });

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum EventIcon {
  Commit,
  PullRequest,
  Issue,
  Create,
  Release,
  Activity
}

impl EventIcon {
  pub fn glyph(self) -> &'static str {
    match self {
      | Self::Commit => "📝",
      | Self::PullRequest => "🔀",
      | Self::Issue => "🐛",
      | Self::Create => "✨",
      | Self::Release => "🚀",
      | Self::Activity => "⚡"
    }
  }

  pub fn as_class(
    self
  ) -> &'static str {
    match self {
      | Self::Commit => "icon-commit",
      | Self::PullRequest => {
        "icon-pull-request"
      }
      | Self::Issue => "icon-issue",
      | Self::Create => "icon-create",
      | Self::Release => "icon-release",
      | Self::Activity => "icon-activity"
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum PullRequestVerb {
  Merged,
  Opened,
  Closed,
  Updated
}

impl PullRequestVerb {
  fn from_payload(
    payload: &EventPayload
  ) -> Self {
    let merged = payload
      .pull_request
      .as_ref()
      .and_then(|pr| pr.merged)
      .unwrap_or(false);
    if merged {
      return Self::Merged;
    }
    match payload.action.as_deref() {
      | Some("opened") => Self::Opened,
      | Some("closed") => Self::Closed,
      | _ => Self::Updated
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::Merged => "Merged",
      | Self::Opened => "Opened",
      | Self::Closed => "Closed",
      | Self::Updated => "Updated"
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateTarget {
  Repository,
  Ref {
    ref_type: String,
    name:     String
  }
}

/// What happened in one event, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDescription {
  Push {
    commits: u64
  },
  PullRequest {
    verb:   PullRequestVerb,
    number: Option<u64>,
    title:  Option<String>
  },
  Issue {
    action: String,
    number: Option<u64>,
    title:  Option<String>
  },
  Create {
    target: CreateTarget
  },
  Release {
    tag: String
  },
  Other {
    label: String
  }
}

impl EventDescription {
  pub fn icon(&self) -> EventIcon {
    match self {
      | Self::Push { .. } => {
        EventIcon::Commit
      }
      | Self::PullRequest { .. } => {
        EventIcon::PullRequest
      }
      | Self::Issue { .. } => {
        EventIcon::Issue
      }
      | Self::Create { .. } => {
        EventIcon::Create
      }
      | Self::Release { .. } => {
        EventIcon::Release
      }
      | Self::Other { .. } => {
        EventIcon::Activity
      }
    }
  }

  /// One-line sentence naming `repo`.
  pub fn sentence(
    &self,
    repo: &str
  ) -> String {
    match self {
      | Self::Push { commits } => {
        let noun = if *commits == 1 {
          "commit"
        } else {
          "commits"
        };
        format!(
          "Pushed {commits} {noun} to \
           {repo}"
        )
      }
      | Self::PullRequest {
        verb,
        number,
        title
      } => {
        with_title(
          format!(
            "{} pull request{} in {repo}",
            verb.label(),
            number_suffix(*number)
          ),
          title.as_deref()
        )
      }
      | Self::Issue {
        action,
        number,
        title
      } => {
        with_title(
          format!(
            "{} issue{} in {repo}",
            capitalize(action),
            number_suffix(*number)
          ),
          title.as_deref()
        )
      }
      | Self::Create {
        target: CreateTarget::Repository
      } => format!("Created repository {repo}"),
      | Self::Create {
        target:
          CreateTarget::Ref { ref_type, name }
      } => {
        let subject =
          format!("{ref_type} {name}");
        format!(
          "Created {} in {repo}",
          subject.trim()
        )
      }
      | Self::Release { tag } => {
        format!("Released {tag} in {repo}")
      }
      | Self::Other { label } => {
        format!("{label} in {repo}")
      }
    }
  }
}

fn number_suffix(
  number: Option<u64>
) -> String {
  number
    .map(|value| format!(" #{value}"))
    .unwrap_or_default()
}

fn with_title(
  sentence: String,
  title: Option<&str>
) -> String {
  match title
    .map(str::trim)
    .filter(|title| !title.is_empty())
  {
    | Some(title) => {
      format!("{sentence}: {title}")
    }
    | None => sentence
  }
}

fn capitalize(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    | Some(first) => first
      .to_uppercase()
      .chain(chars)
      .collect(),
    | None => String::new()
  }
}

/// `"SomeWeirdEvent"` → `"Some Weird"`.
pub fn humanize_event_type(
  kind: &str
) -> String {
  let stripped = kind
    .strip_suffix("Event")
    .unwrap_or(kind);
  WORD_BOUNDARY
    .replace_all(stripped, "$1 $2")
    .into_owned()
}

/// Classifies one event. `None` means the event is not shown.
pub fn describe_event(
  kind: &str,
  payload: &EventPayload
) -> Option<EventDescription> {
  match kind {
    | "PushEvent" => {
      let commits = payload.commit_count();
      if commits == 0 {
        return None;
      }
      Some(EventDescription::Push { commits })
    }
    | "PullRequestEvent" => {
      let pr = payload.pull_request.as_ref();
      Some(EventDescription::PullRequest {
        verb:   PullRequestVerb::from_payload(
          payload
        ),
        number: payload
          .number
          .or_else(|| pr.and_then(|pr| pr.number)),
        title:  pr.and_then(|pr| pr.title.clone())
      })
    }
    | "IssuesEvent" => {
      let issue = payload.issue.as_ref();
      Some(EventDescription::Issue {
        action: payload
          .action
          .clone()
          .filter(|action| !action.is_empty())
          .unwrap_or_else(|| {
            "updated".to_string()
          }),
        number: issue
          .and_then(|issue| issue.number),
        title:  issue.and_then(|issue| {
          issue.title.clone()
        })
      })
    }
    | "WatchEvent" | "ForkEvent"
    | "PublicEvent" => None,
    | "CreateEvent" => {
      let ref_type = payload
        .ref_type
        .clone()
        .unwrap_or_default();
      let target = if ref_type == "repository"
      {
        CreateTarget::Repository
      } else {
        CreateTarget::Ref {
          ref_type,
          name: payload
            .git_ref
            .clone()
            .unwrap_or_default()
        }
      };
      Some(EventDescription::Create { target })
    }
    | "ReleaseEvent" => {
      Some(EventDescription::Release {
        tag: payload
          .release
          .as_ref()
          .and_then(|release| {
            release.tag_name.clone()
          })
          .filter(|tag| !tag.is_empty())
          .unwrap_or_else(|| {
            "release".to_string()
          })
      })
    }
    | other => {
      Some(EventDescription::Other {
        label: humanize_event_type(other)
      })
    }
  }
}

/// Render-ready summary of one qualifying event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
  pub id:          String,
  pub repository:  String,
  pub description: EventDescription,
  pub timestamp:   DateTime<Utc>
}

impl DisplayItem {
  pub fn icon(&self) -> EventIcon {
    self.description.icon()
  }

  pub fn sentence(&self) -> String {
    self
      .description
      .sentence(&self.repository)
  }
}

impl fmt::Display for DisplayItem {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "{} {}",
      self.icon().glyph(),
      self.sentence()
    )
  }
}

/// Builds at most `limit` items, in received order.
pub fn build_display_items(
  events: &[ActivityEvent],
  limit: usize
) -> Vec<DisplayItem> {
  let mut items =
    Vec::with_capacity(limit.min(events.len()));
  for event in events {
    if items.len() >= limit {
      break;
    }
    let Some(repository) =
      event.repository_name()
    else {
      tracing::trace!(
        id = %event.id,
        kind = %event.kind,
        "skipping event without repository"
      );
      continue;
    };
    let Some(description) = describe_event(
      &event.kind,
      &event.payload
    ) else {
      continue;
    };
    items.push(DisplayItem {
      id: event.id.clone(),
      repository: repository.to_string(),
      description,
      timestamp: event.created_at
    });
  }
  items
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::event::{
    PullRequest,
    Release,
    Repository
  };

  fn event(
    id: &str,
    kind: &str,
    repo: Option<&str>,
    payload: EventPayload
  ) -> ActivityEvent {
    ActivityEvent {
      id: id.to_string(),
      kind: kind.to_string(),
      created_at: Utc
        .with_ymd_and_hms(2026, 10, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp"),
      repository: repo.map(|name| Repository {
        name: Some(name.to_string()),
        url:  None
      }),
      payload,
      actor: None
    }
  }

  fn push(size: u64) -> EventPayload {
    EventPayload {
      size: Some(size),
      ..EventPayload::default()
    }
  }

  #[test]
  fn push_pluralizes_commits() {
    let one = describe_event("PushEvent", &push(1))
      .expect("item");
    let many =
      describe_event("PushEvent", &push(3))
        .expect("item");
    assert_eq!(
      one.sentence("o/r"),
      "Pushed 1 commit to o/r"
    );
    assert_eq!(
      many.sentence("o/r"),
      "Pushed 3 commits to o/r"
    );
  }

  #[test]
  fn empty_push_is_dropped() {
    assert_eq!(
      describe_event("PushEvent", &push(0)),
      None
    );
    assert_eq!(
      describe_event(
        "PushEvent",
        &EventPayload::default()
      ),
      None
    );
  }

  #[test]
  fn merged_wins_over_action() {
    let payload = EventPayload {
      action: Some("closed".to_string()),
      number: Some(12),
      pull_request: Some(PullRequest {
        number: Some(12),
        title:  Some("Fix race".to_string()),
        merged: Some(true)
      }),
      ..EventPayload::default()
    };
    let description =
      describe_event("PullRequestEvent", &payload)
        .expect("item");
    assert_eq!(
      description.sentence("o/r"),
      "Merged pull request #12 in o/r: Fix race"
    );
  }

  #[test]
  fn pull_request_verbs_follow_action() {
    let verb = |action: Option<&str>| {
      let payload = EventPayload {
        action: action.map(str::to_string),
        pull_request: Some(PullRequest {
          merged: Some(false),
          ..PullRequest::default()
        }),
        ..EventPayload::default()
      };
      match describe_event(
        "PullRequestEvent",
        &payload
      ) {
        | Some(EventDescription::PullRequest {
          verb,
          ..
        }) => verb,
        | other => panic!("unexpected {other:?}")
      }
    };
    assert_eq!(
      verb(Some("opened")),
      PullRequestVerb::Opened
    );
    assert_eq!(
      verb(Some("closed")),
      PullRequestVerb::Closed
    );
    assert_eq!(
      verb(Some("synchronize")),
      PullRequestVerb::Updated
    );
    assert_eq!(
      verb(None),
      PullRequestVerb::Updated
    );
  }

  #[test]
  fn issue_uses_action_number_and_title() {
    let payload = EventPayload {
      action: Some("reopened".to_string()),
      issue: Some(crate::event::Issue {
        number: Some(4),
        title:  Some("Crash on start".to_string())
      }),
      ..EventPayload::default()
    };
    let description =
      describe_event("IssuesEvent", &payload)
        .expect("item");
    assert_eq!(
      description.sentence("o/r"),
      "Reopened issue #4 in o/r: Crash on start"
    );
  }

  #[test]
  fn watch_fork_public_are_suppressed() {
    let noisy = EventPayload {
      action: Some("started".to_string()),
      size: Some(5),
      ..EventPayload::default()
    };
    for kind in
      ["WatchEvent", "ForkEvent", "PublicEvent"]
    {
      assert_eq!(
        describe_event(kind, &noisy),
        None,
        "{kind}"
      );
    }
  }

  #[test]
  fn create_distinguishes_repository_from_refs() {
    let repo = EventPayload {
      ref_type: Some("repository".to_string()),
      ..EventPayload::default()
    };
    let branch = EventPayload {
      ref_type: Some("branch".to_string()),
      git_ref: Some("feature/x".to_string()),
      ..EventPayload::default()
    };
    assert_eq!(
      describe_event("CreateEvent", &repo)
        .expect("item")
        .sentence("o/r"),
      "Created repository o/r"
    );
    assert_eq!(
      describe_event("CreateEvent", &branch)
        .expect("item")
        .sentence("o/r"),
      "Created branch feature/x in o/r"
    );
  }

  #[test]
  fn release_falls_back_to_literal() {
    let tagged = EventPayload {
      release: Some(Release {
        tag_name: Some("v1.2.0".to_string()),
        name:     None
      }),
      ..EventPayload::default()
    };
    assert_eq!(
      describe_event("ReleaseEvent", &tagged),
      Some(EventDescription::Release {
        tag: "v1.2.0".to_string()
      })
    );
    assert_eq!(
      describe_event(
        "ReleaseEvent",
        &EventPayload::default()
      ),
      Some(EventDescription::Release {
        tag: "release".to_string()
      })
    );
  }

  #[test]
  fn unknown_types_are_humanized() {
    assert_eq!(
      humanize_event_type("SomeWeirdEvent"),
      "Some Weird"
    );
    assert_eq!(
      humanize_event_type("SomeEventType"),
      "Some Event Type"
    );
    assert_eq!(
      describe_event(
        "GollumEvent",
        &EventPayload::default()
      ),
      Some(EventDescription::Other {
        label: "Gollum".to_string()
      })
    );
  }

  #[test]
  fn missing_repository_never_consumes_limit() {
    let events = vec![
      event("1", "PushEvent", None, push(4)),
      event("2", "PushEvent", None, push(4)),
      event("3", "PushEvent", Some("o/a"), push(1)),
      event("4", "IssuesEvent", Some("o/b"), EventPayload::default()),
    ];
    let items = build_display_items(&events, 2);
    let ids = items
      .iter()
      .map(|item| item.id.as_str())
      .collect::<Vec<_>>();
    assert_eq!(ids, vec!["3", "4"]);
  }

  #[test]
  fn output_never_exceeds_limit() {
    let events = (0..20)
      .map(|idx| {
        event(
          &idx.to_string(),
          "PushEvent",
          Some("o/r"),
          push(1)
        )
      })
      .collect::<Vec<_>>();
    for limit in [0_usize, 1, 5, 20, 50] {
      let items =
        build_display_items(&events, limit);
      assert!(items.len() <= limit);
      assert_eq!(items.len(), limit.min(20));
    }
  }

  #[test]
  fn suppressed_events_are_skipped_in_order() {
    let events = vec![
      event("1", "WatchEvent", Some("o/r"), EventPayload::default()),
      event("2", "PushEvent", Some("o/r"), push(0)),
      event("3", "ForkEvent", Some("o/r"), EventPayload::default()),
      event("4", "PushEvent", Some("o/r"), push(2)),
    ];
    let items = build_display_items(&events, 10);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "4");
    assert_eq!(
      items[0].to_string(),
      "📝 Pushed 2 commits to o/r"
    );
  }
}
