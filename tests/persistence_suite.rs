mod common;

use common::setup_test_env;
use masjid_core::config::Config;
use masjid_core::core::services::ScheduleService;
use masjid_core::domain::prayer::{Prayer, PrayerSchedule, TimeField};
use masjid_core::storage::{self, DocumentId, StorageBackend};

#[test]
fn missing_document_loads_as_default() {
    let (store, _) = setup_test_env();
    let schedule: PrayerSchedule =
        storage::load_document(&store, DocumentId::PrayerTimes).expect("load default");
    assert_eq!(schedule, PrayerSchedule::default());
    assert!(store
        .load_raw(DocumentId::PrayerTimes)
        .expect("raw load")
        .is_none());
}

#[test]
fn saved_document_round_trips() {
    let (store, _) = setup_test_env();
    let mut schedule = PrayerSchedule::default();
    schedule
        .apply_field(Prayer::Fajr, TimeField::Adhan, "5:15 AM")
        .expect("edit");
    storage::save_document(&store, DocumentId::PrayerTimes, &schedule).expect("save");
    let loaded: PrayerSchedule =
        storage::load_document(&store, DocumentId::PrayerTimes).expect("load");
    assert_eq!(loaded, schedule);
}

#[test]
fn second_save_backs_up_previous_content() {
    let (store, _) = setup_test_env();
    let mut schedule = PrayerSchedule::default();
    storage::save_document(&store, DocumentId::PrayerTimes, &schedule).expect("first save");
    assert!(store
        .list_backups(DocumentId::PrayerTimes)
        .expect("list")
        .is_empty());

    schedule
        .apply_field(Prayer::Isha, TimeField::Adhan, "9:00 PM")
        .expect("edit");
    storage::save_document(&store, DocumentId::PrayerTimes, &schedule).expect("second save");
    let backups = store.list_backups(DocumentId::PrayerTimes).expect("list");
    assert_eq!(backups.len(), 1);
}

#[test]
fn rapid_saves_keep_distinct_backups() {
    let (store, _) = setup_test_env();
    let mut schedule = PrayerSchedule::default();
    storage::save_document(&store, DocumentId::PrayerTimes, &schedule).expect("first save");
    // Both follow-up saves land within the same timestamp second; each must
    // still produce its own backup of the content it replaced.
    for time in ["6:00 AM", "6:15 AM"] {
        schedule
            .apply_field(Prayer::Fajr, TimeField::Adhan, time)
            .expect("edit");
        storage::save_document(&store, DocumentId::PrayerTimes, &schedule).expect("save");
    }
    let backups = store.list_backups(DocumentId::PrayerTimes).expect("list");
    assert_eq!(backups.len(), 2);
    assert_ne!(backups[0], backups[1]);
}

#[test]
fn restore_recovers_earlier_content() {
    let (store, _) = setup_test_env();
    let original = PrayerSchedule::default();
    storage::save_document(&store, DocumentId::PrayerTimes, &original).expect("save v1");

    let mut edited = original.clone();
    edited
        .apply_field(Prayer::Asr, TimeField::Adhan, "4:45 PM")
        .expect("edit");
    storage::save_document(&store, DocumentId::PrayerTimes, &edited).expect("save v2");

    let backups = store.list_backups(DocumentId::PrayerTimes).expect("list");
    store
        .restore(DocumentId::PrayerTimes, &backups[0])
        .expect("restore");
    let loaded: PrayerSchedule =
        storage::load_document(&store, DocumentId::PrayerTimes).expect("load");
    assert_eq!(loaded, original);
}

#[test]
fn explicit_backup_requires_saved_document() {
    let (store, _) = setup_test_env();
    assert!(store.backup(DocumentId::Events, Some("before-import")).is_err());
}

#[test]
fn backup_notes_are_sanitized_into_names() {
    let (store, _) = setup_test_env();
    storage::save_document(&store, DocumentId::Events, &Vec::<serde_json::Value>::new())
        .expect("save");
    let name = store
        .backup(DocumentId::Events, Some("Before Ramadan import!"))
        .expect("backup");
    assert!(name.starts_with("events_"));
    assert!(name.ends_with("before-ramadan-import.json"));
}

#[test]
fn retention_caps_stored_backups() {
    let (store, _) = setup_test_env();
    storage::save_document(&store, DocumentId::Events, &Vec::<serde_json::Value>::new())
        .expect("save");
    for index in 0..6 {
        store
            .backup(DocumentId::Events, Some(&format!("note-{index}")))
            .expect("backup");
    }
    let backups = store.list_backups(DocumentId::Events).expect("list");
    assert!(backups.len() <= 3, "retention left {} backups", backups.len());
}

#[test]
fn config_round_trips_through_manager() {
    let (_, config_manager) = setup_test_env();
    assert_eq!(config_manager.load().expect("default load"), Config::default());

    let config = Config {
        timezone: "Europe/London".to_string(),
        ..Config::default()
    };
    config_manager.save(&config).expect("save");
    assert_eq!(config_manager.load().expect("reload"), config);
}

#[test]
fn config_backup_and_restore() {
    let (_, config_manager) = setup_test_env();
    let original = Config::default();
    config_manager.save(&original).expect("save");
    let name = config_manager
        .backup(&original, Some("pre change"))
        .expect("backup");

    let changed = Config {
        timezone: "Pacific/Auckland".to_string(),
        ..Config::default()
    };
    config_manager.save(&changed).expect("save change");

    let restored = config_manager.restore(&name).expect("restore");
    assert_eq!(restored, original);
    assert!(!config_manager.list_backups().expect("list").is_empty());
}

#[test]
fn schedule_service_uses_store_round_trip() {
    let (store, _) = setup_test_env();
    let loaded = ScheduleService::load_prayer_schedule(&store).expect("default");
    assert_eq!(loaded, PrayerSchedule::default());
}
