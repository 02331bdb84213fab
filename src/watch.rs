/*!
 * Watch mode for Treegen
 *
 * A recursive watcher feeds filesystem events into a channel drained by
 * a synchronous loop. Instead of a timer-reset debounce with an
 * in-flight guard, the loop keeps a single-slot queue: a relevant event
 * arms a pending run with a quiet-period deadline, and events observed
 * while a run executes sit in the channel until the next iteration,
 * where they coalesce into one trailing re-run. A trigger is therefore
 * never silently dropped.
 */

use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::event::ModifyKind;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::error::Result;
use crate::generate::Generator;
use crate::ignore::should_ignore;
use crate::term;

/// Quiet period between the last relevant event and a regeneration run
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Watch the generator's root directory and re-run on structural changes
///
/// Runs until the watcher backend disconnects (normally the process is
/// stopped with Ctrl+C). Watcher setup errors are returned; errors during
/// a regeneration run are reported and the loop keeps going.
pub fn watch_loop(mut generator: Generator) -> Result<()> {
    let root_dir = generator.config().root_dir.clone();
    let patterns = generator.ignore_patterns()?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })?;
    watcher.watch(&root_dir, RecursiveMode::Recursive)?;

    term::info("👀 Watching for file changes... (Press Ctrl+C to stop)");

    let mut pending = false;
    let mut deadline = Instant::now();

    loop {
        if pending {
            let timeout = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(timeout) {
                Ok(res) => note_event(res, &patterns, &root_dir, &mut pending, &mut deadline),
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    pending = false;
                    term::info("File change detected, regenerating tree...");
                    // Errors are reported by the run itself; the watch
                    // loop outlives them
                    let _ = generator.run();
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match rx.recv() {
                Ok(res) => note_event(res, &patterns, &root_dir, &mut pending, &mut deadline),
                Err(_) => break,
            }
        }
    }

    Ok(())
}

/// Fold one watcher message into the pending-run slot
fn note_event(
    res: notify::Result<Event>,
    patterns: &[String],
    root_dir: &Path,
    pending: &mut bool,
    deadline: &mut Instant,
) {
    match res {
        Ok(event) => {
            if triggers_regeneration(&event) && !ignored_event(&event, patterns, root_dir) {
                *pending = true;
                *deadline = Instant::now() + DEBOUNCE;
            }
        }
        Err(e) => term::warn(&format!("Watch error: {}", e)),
    }
}

/// Structural changes only: creations, removals and renames. Content
/// modifications leave the tree unchanged, and skipping them keeps the
/// tool's own README/output writes from re-triggering a run.
fn triggers_regeneration(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    )
}

/// True when every path carried by the event is ignored
fn ignored_event(event: &Event, patterns: &[String], root_dir: &Path) -> bool {
    event.paths.iter().all(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        should_ignore(&name, path, patterns, root_dir)
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use notify::event::{AccessKind, CreateKind, DataChange, ModifyKind, RemoveKind, RenameMode};
    use notify::{Event, EventKind};

    use super::*;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_structural_events_trigger() {
        assert!(triggers_regeneration(&event(
            EventKind::Create(CreateKind::File),
            "/p/new.txt"
        )));
        assert!(triggers_regeneration(&event(
            EventKind::Remove(RemoveKind::Folder),
            "/p/old"
        )));
        assert!(triggers_regeneration(&event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            "/p/renamed.txt"
        )));
    }

    #[test]
    fn test_content_modifications_do_not_trigger() {
        assert!(!triggers_regeneration(&event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            "/p/README.md"
        )));
        assert!(!triggers_regeneration(&event(
            EventKind::Access(AccessKind::Any),
            "/p/x"
        )));
    }

    #[test]
    fn test_events_under_ignored_directories_are_filtered() {
        let root = Path::new("/project");
        let patterns = vec!["node_modules".to_string()];

        let inside = event(
            EventKind::Create(CreateKind::File),
            "/project/node_modules/left-pad/index.js",
        );
        assert!(ignored_event(&inside, &patterns, root));

        let outside = event(EventKind::Create(CreateKind::File), "/project/src/new.rs");
        assert!(!ignored_event(&outside, &patterns, root));
    }

    #[test]
    fn test_rename_spanning_ignored_and_kept_paths_triggers() {
        let root = Path::new("/project");
        let patterns = vec!["dist".to_string()];

        // One path ignored, one not: the event still counts
        let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(PathBuf::from("/project/dist/bundle.js"))
            .add_path(PathBuf::from("/project/bundle.js"));
        assert!(!ignored_event(&event, &patterns, root));
    }

    #[test]
    fn test_note_event_arms_pending_run() {
        let root = Path::new("/project");
        let patterns = vec!["dist".to_string()];
        let mut pending = false;
        let mut deadline = Instant::now();

        let before = Instant::now();
        note_event(
            Ok(event(EventKind::Create(CreateKind::File), "/project/a.txt")),
            &patterns,
            root,
            &mut pending,
            &mut deadline,
        );
        assert!(pending);
        assert!(deadline >= before + DEBOUNCE);

        // An ignored path leaves the slot untouched
        let mut pending = false;
        note_event(
            Ok(event(
                EventKind::Create(CreateKind::File),
                "/project/dist/a.js",
            )),
            &patterns,
            root,
            &mut pending,
            &mut deadline,
        );
        assert!(!pending);
    }
}
