mod common;

use common::{FakeDestination, ids};
use plmigrate::migration::{
    CommitError, DEFAULT_DESCRIPTION, DEFAULT_PLAYLIST_TITLE, INCOMPLETE_PREFIX, commit,
};

fn numbered(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("id{}", i)).collect()
}

#[tokio::test]
async fn test_splits_into_batches() {
    let tidal = FakeDestination::default();
    let track_ids = numbered(250);

    let playlist = commit(&tidal, "Mix", DEFAULT_DESCRIPTION, &track_ids, 100, |_, _| {})
        .await
        .unwrap();

    let appends = tidal.appends();
    let sizes: Vec<usize> = appends.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(appends.concat(), track_ids);

    assert_eq!(playlist.title, "Mix");
    assert_eq!(tidal.created().len(), 1);
    assert!(tidal.descriptions().is_empty());
}

#[tokio::test]
async fn test_batch_count_is_ceil_of_ids_over_size() {
    for n in [1, 7, 99, 100, 101, 250] {
        for batch_size in [1, 7, 100] {
            let tidal = FakeDestination::default();
            let track_ids = numbered(n);

            commit(&tidal, "Mix", DEFAULT_DESCRIPTION, &track_ids, batch_size, |_, _| {})
                .await
                .unwrap();

            let appends = tidal.appends();
            assert_eq!(appends.len(), n.div_ceil(batch_size), "n {} b {}", n, batch_size);
            assert!(appends.iter().all(|b| !b.is_empty() && b.len() <= batch_size));
            assert_eq!(appends.concat(), track_ids);
        }
    }
}

#[tokio::test]
async fn test_zero_batch_size_sends_one_id_per_batch() {
    let tidal = FakeDestination::default();

    commit(&tidal, "Mix", DEFAULT_DESCRIPTION, &ids(&["a", "b"]), 0, |_, _| {})
        .await
        .unwrap();

    assert_eq!(tidal.appends(), vec![ids(&["a"]), ids(&["b"])]);
}

#[tokio::test]
async fn test_empty_track_list_creates_empty_playlist() {
    let tidal = FakeDestination::default();

    let playlist = commit(&tidal, "Nothing", DEFAULT_DESCRIPTION, &[], 100, |_, _| {})
        .await
        .unwrap();

    assert_eq!(playlist.title, "Nothing");
    assert_eq!(tidal.created().len(), 1);
    assert!(tidal.appends().is_empty());
}

#[tokio::test]
async fn test_blank_title_uses_default() {
    for title in ["", "   "] {
        let tidal = FakeDestination::default();

        let playlist = commit(&tidal, title, DEFAULT_DESCRIPTION, &ids(&["a"]), 100, |_, _| {})
            .await
            .unwrap();

        assert_eq!(playlist.title, DEFAULT_PLAYLIST_TITLE);
        assert_eq!(tidal.created()[0].description, DEFAULT_DESCRIPTION);
    }
}

#[tokio::test]
async fn test_reports_progress_after_each_batch() {
    let tidal = FakeDestination::default();
    let mut progress = Vec::new();

    commit(&tidal, "Mix", DEFAULT_DESCRIPTION, &numbered(250), 100, |done, total| {
        progress.push((done, total))
    })
    .await
    .unwrap();

    assert_eq!(progress, vec![(100, 250), (200, 250), (250, 250)]);
}

#[tokio::test]
async fn test_append_failure_marks_playlist_incomplete() {
    let tidal = FakeDestination {
        fail_append_at: Some(1),
        ..FakeDestination::default()
    };
    let track_ids = numbered(250);

    let err = commit(&tidal, "Mix", DEFAULT_DESCRIPTION, &track_ids, 100, |_, _| {})
        .await
        .unwrap_err();

    match err {
        CommitError::Append {
            playlist,
            appended,
            marked_incomplete,
            source,
        } => {
            assert_eq!(playlist.title, "Mix");
            assert_eq!(appended, 100);
            assert!(marked_incomplete);
            assert_eq!(source.to_string(), "append failed");
        }
        other => panic!("expected append error, got {}", other),
    }

    // Nothing after the failing batch is sent
    assert_eq!(tidal.appends().len(), 1);
    assert_eq!(
        tidal.descriptions(),
        vec![format!("{}{}", INCOMPLETE_PREFIX, DEFAULT_DESCRIPTION)]
    );
}

#[tokio::test]
async fn test_append_failure_survives_failed_marking() {
    let tidal = FakeDestination {
        fail_append_at: Some(0),
        fail_update: true,
        ..FakeDestination::default()
    };

    let err = commit(&tidal, "Mix", DEFAULT_DESCRIPTION, &numbered(3), 100, |_, _| {})
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CommitError::Append {
            appended: 0,
            marked_incomplete: false,
            ..
        }
    ));
    assert!(err.to_string().contains("after 0 track(s)"));
}

#[tokio::test]
async fn test_create_failure_sends_nothing() {
    let tidal = FakeDestination {
        fail_create: true,
        ..FakeDestination::default()
    };

    let err = commit(&tidal, "Mix", DEFAULT_DESCRIPTION, &numbered(10), 100, |_, _| {})
        .await
        .unwrap_err();

    assert!(matches!(err, CommitError::Create(_)));
    assert!(tidal.appends().is_empty());
    assert!(tidal.descriptions().is_empty());
}
