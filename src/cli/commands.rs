use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;
use dialoguer::Confirm;
use uuid::Uuid;

use crate::analytics::Period;
use crate::config::{Config, ConfigManager};
use crate::core::clock::SystemClock;
use crate::core::services::{
    AnalyticsService, CampaignService, EventService, ScheduleService, SettingsService,
};
use crate::domain::campaign::Campaign;
use crate::domain::event::{Event, EventCategory};
use crate::domain::prayer::{Prayer, TimeField};
use crate::domain::Displayable;
use crate::storage::{DocumentId, DocumentStore, StorageBackend};

use super::{output, CliError};

const USAGE: &str = "\
Usage: masjid_admin_cli <command> [args]

Commands:
  times show
  times set <prayer> <adhan|iqama|iqama_type|iqama_offset> <value>
  jumuah show
  jumuah set <first|second> <khutbah|prayer> <time>
  profile show
  profile set <name|address|phone|email|website|imam> <value>
  events list
  events add <title> <YYYY-MM-DD> <H:MM AM/PM> [category]
  events delete <id> [--yes]
  events set-active <id> <true|false>
  events rsvp <id>
  campaigns list
  campaigns add <title> <goal-minor-units> <start> <end>
  campaigns donate <id> <amount-minor-units>
  campaigns delete <id> [--yes]
  settings show
  settings add-type <label>
  settings toggle-type <id>
  settings add-preset <amount-minor-units>
  settings remove-preset <amount-minor-units>
  settings toggle-frequency <id>
  analytics summary <snapshot.json> [today|week|month|year]
  analytics export <snapshot.json> [out.csv]
  backups list <document>
  backups create <document> [note]
  backups restore <document> <backup-name>
  config show
  config set-timezone <iana-zone>
  version";

/// Entry point for the admin binary: parses `std::env::args` and runs
/// one command against the local document store.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        output::info(USAGE);
        return Ok(());
    };
    match command.as_str() {
        "times" => times(&args[1..]),
        "jumuah" => jumuah(&args[1..]),
        "profile" => profile(&args[1..]),
        "events" => events(&args[1..]),
        "campaigns" => campaigns(&args[1..]),
        "settings" => settings(&args[1..]),
        "analytics" => analytics(&args[1..]),
        "backups" => backups(&args[1..]),
        "config" => config_cmd(&args[1..]),
        "version" => {
            output::info(format!(
                "masjid_admin_cli {} ({}, {})",
                env!("CARGO_PKG_VERSION"),
                env!("MASJID_CORE_BUILD_HASH"),
                env!("MASJID_CORE_BUILD_PROFILE"),
            ));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            output::info(USAGE);
            Ok(())
        }
        other => Err(CliError::Usage(format!(
            "unknown command `{other}`; run `masjid_admin_cli help`"
        ))),
    }
}

fn open_store() -> Result<(DocumentStore, Config), CliError> {
    let store = DocumentStore::new_default()?;
    let config = ConfigManager::new()?.load()?;
    Ok((store, config))
}

fn usage(message: &str) -> CliError {
    CliError::Usage(message.to_string())
}

fn arg<'a>(args: &'a [String], index: usize, message: &str) -> Result<&'a str, CliError> {
    args.get(index).map(String::as_str).ok_or_else(|| usage(message))
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    raw.parse()
        .map_err(|_| usage(&format!("`{raw}` is not a YYYY-MM-DD date")))
}

fn parse_id(raw: &str) -> Result<Uuid, CliError> {
    raw.parse()
        .map_err(|_| usage(&format!("`{raw}` is not a valid id")))
}

fn parse_amount(raw: &str) -> Result<i64, CliError> {
    raw.parse()
        .map_err(|_| usage(&format!("`{raw}` is not an amount in minor currency units")))
}

fn confirm_or_skip(prompt: &str, args: &[String]) -> Result<bool, CliError> {
    if args.iter().any(|flag| flag == "--yes") {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

fn times(args: &[String]) -> Result<(), CliError> {
    let (store, config) = open_store()?;
    match arg(args, 0, "times needs `show` or `set`")? {
        "show" => {
            let schedule = ScheduleService::load_prayer_schedule(&store)?;
            output::section("Prayer Times");
            for (prayer, entry) in schedule.iter() {
                output::field(
                    prayer.name(),
                    format!("adhan {}  iqama {}", entry.adhan, entry.effective_iqama()),
                );
            }
            if let Some(updated) = schedule.last_updated {
                output::field("last updated", updated);
            }
            Ok(())
        }
        "set" => {
            let prayer = Prayer::parse(arg(args, 1, "times set needs a prayer name")?)
                .ok_or_else(|| usage("prayer must be fajr, dhuhr, asr, maghrib, or isha"))?;
            let field = TimeField::parse(arg(args, 2, "times set needs a field name")?)
                .ok_or_else(|| usage("field must be adhan, iqama, iqama_type, or iqama_offset"))?;
            let value = arg(args, 3, "times set needs a value")?;
            let mut schedule = ScheduleService::load_prayer_schedule(&store)?;
            schedule.apply_field(prayer, field, value)?;
            ScheduleService::save_prayer_schedule(&store, &SystemClock, config.tz(), &mut schedule)?;
            output::success(format!("{prayer} updated"));
            Ok(())
        }
        other => Err(usage(&format!("unknown times subcommand `{other}`"))),
    }
}

fn jumuah(args: &[String]) -> Result<(), CliError> {
    let (store, config) = open_store()?;
    match arg(args, 0, "jumuah needs `show` or `set`")? {
        "show" => {
            let schedule = ScheduleService::load_jumuah_schedule(&store)?;
            output::section("Jumuah Times");
            for (label, index) in [("first", 0), ("second", 1)] {
                if let Some(session) = schedule.session(index) {
                    output::field(
                        label,
                        format!("khutbah {}  prayer {}", session.khutbah, session.prayer),
                    );
                }
            }
            Ok(())
        }
        "set" => {
            let index = match arg(args, 1, "jumuah set needs `first` or `second`")? {
                "first" => 0,
                "second" => 1,
                other => return Err(usage(&format!("unknown session `{other}`"))),
            };
            let part = arg(args, 2, "jumuah set needs `khutbah` or `prayer`")?.to_string();
            let value = arg(args, 3, "jumuah set needs a time")?.to_string();
            let mut schedule = ScheduleService::load_jumuah_schedule(&store)?;
            {
                let session = schedule
                    .session_mut(index)
                    .ok_or_else(|| usage("unknown session"))?;
                match part.as_str() {
                    "khutbah" => session.khutbah = value,
                    "prayer" => session.prayer = value,
                    other => return Err(usage(&format!("unknown session field `{other}`"))),
                }
            }
            ScheduleService::save_jumuah_schedule(&store, &SystemClock, config.tz(), &mut schedule)?;
            output::success("jumuah schedule updated");
            Ok(())
        }
        other => Err(usage(&format!("unknown jumuah subcommand `{other}`"))),
    }
}

fn profile(args: &[String]) -> Result<(), CliError> {
    let (store, config) = open_store()?;
    match arg(args, 0, "profile needs `show` or `set`")? {
        "show" => {
            let profile = SettingsService::load_profile(&store)?;
            output::section("Mosque Profile");
            output::field("name", &profile.name);
            for (label, value) in [
                ("address", &profile.address),
                ("phone", &profile.phone),
                ("email", &profile.email),
                ("website", &profile.website),
                ("imam", &profile.imam),
            ] {
                if let Some(value) = value {
                    output::field(label, value);
                }
            }
            Ok(())
        }
        "set" => {
            let field = arg(args, 1, "profile set needs a field name")?.to_string();
            let value = arg(args, 2, "profile set needs a value")?.to_string();
            let mut profile = SettingsService::load_profile(&store)?;
            match field.as_str() {
                "name" => profile.name = value,
                "address" => profile.address = Some(value),
                "phone" => profile.phone = Some(value),
                "email" => profile.email = Some(value),
                "website" => profile.website = Some(value),
                "imam" => profile.imam = Some(value),
                other => return Err(usage(&format!("unknown profile field `{other}`"))),
            }
            SettingsService::save_profile(&store, &SystemClock, config.tz(), &mut profile)?;
            output::success("profile updated");
            Ok(())
        }
        other => Err(usage(&format!("unknown profile subcommand `{other}`"))),
    }
}

fn events(args: &[String]) -> Result<(), CliError> {
    let (store, _) = open_store()?;
    match arg(args, 0, "events needs a subcommand")? {
        "list" => {
            let events = EventService::list(&store)?;
            output::section("Events");
            if events.is_empty() {
                output::info("  (no events)");
            }
            for event in events {
                let flag = if event.is_active { "" } else { " [inactive]" };
                output::field(
                    &event.id.to_string(),
                    format!("{}{flag}", event.display_label()),
                );
            }
            Ok(())
        }
        "add" => {
            let title = arg(args, 1, "events add needs a title")?;
            let date = parse_date(arg(args, 2, "events add needs a date")?)?;
            let time = arg(args, 3, "events add needs a time")?;
            let category = match args.get(4) {
                Some(raw) => EventCategory::parse(raw)
                    .ok_or_else(|| usage(&format!("unknown category `{raw}`")))?,
                None => EventCategory::default(),
            };
            let event = Event::new(title, date, time, category);
            let saved = EventService::upsert(&store, &SystemClock, event)?;
            output::success(format!("event {} created", saved.id));
            Ok(())
        }
        "delete" => {
            let id = parse_id(arg(args, 1, "events delete needs an id")?)?;
            if !confirm_or_skip("Delete this event?", args)? {
                output::warning("delete cancelled");
                return Ok(());
            }
            if EventService::delete(&store, id)? {
                output::success("event deleted");
            } else {
                output::warning("no event with that id");
            }
            Ok(())
        }
        "set-active" => {
            let id = parse_id(arg(args, 1, "events set-active needs an id")?)?;
            let active = match arg(args, 2, "events set-active needs true or false")? {
                "true" => true,
                "false" => false,
                other => return Err(usage(&format!("expected true or false, got `{other}`"))),
            };
            if EventService::set_active(&store, id, active)? {
                output::success(format!(
                    "event marked {}",
                    if active { "active" } else { "inactive" }
                ));
            } else {
                output::warning("no event with that id");
            }
            Ok(())
        }
        "rsvp" => {
            let id = parse_id(arg(args, 1, "events rsvp needs an id")?)?;
            let count = EventService::register_rsvp(&store, id)?;
            output::success(format!("RSVP recorded ({count} attending)"));
            Ok(())
        }
        other => Err(usage(&format!("unknown events subcommand `{other}`"))),
    }
}

fn campaigns(args: &[String]) -> Result<(), CliError> {
    let (store, config) = open_store()?;
    match arg(args, 0, "campaigns needs a subcommand")? {
        "list" => {
            let campaigns = CampaignService::list(&store)?;
            output::section("Campaigns");
            if campaigns.is_empty() {
                output::info("  (no campaigns)");
            }
            for campaign in campaigns {
                output::field(
                    &campaign.id.to_string(),
                    format!(
                        "{} {} / {} ({:.0}%)",
                        campaign.title,
                        output::money(campaign.current_amount),
                        output::money(campaign.goal_amount),
                        campaign.progress_percent(),
                    ),
                );
            }
            Ok(())
        }
        "add" => {
            let title = arg(args, 1, "campaigns add needs a title")?;
            let goal = parse_amount(arg(args, 2, "campaigns add needs a goal")?)?;
            let start = parse_date(arg(args, 3, "campaigns add needs a start date")?)?;
            let end = parse_date(arg(args, 4, "campaigns add needs an end date")?)?;
            let campaign = Campaign::new(title, goal, &config.currency, start, end);
            let saved = CampaignService::upsert(&store, &SystemClock, campaign)?;
            output::success(format!("campaign {} created", saved.id));
            Ok(())
        }
        "donate" => {
            let id = parse_id(arg(args, 1, "campaigns donate needs an id")?)?;
            let amount = parse_amount(arg(args, 2, "campaigns donate needs an amount")?)?;
            let campaign = CampaignService::record_donation(&store, &SystemClock, id, amount)?;
            output::success(format!(
                "{}, raised so far: {}",
                campaign.display_label(),
                output::money(campaign.current_amount),
            ));
            Ok(())
        }
        "delete" => {
            let id = parse_id(arg(args, 1, "campaigns delete needs an id")?)?;
            if !confirm_or_skip("Delete this campaign?", args)? {
                output::warning("delete cancelled");
                return Ok(());
            }
            if CampaignService::delete(&store, id)? {
                output::success("campaign deleted");
            } else {
                output::warning("no campaign with that id");
            }
            Ok(())
        }
        other => Err(usage(&format!("unknown campaigns subcommand `{other}`"))),
    }
}

fn settings(args: &[String]) -> Result<(), CliError> {
    let (store, config) = open_store()?;
    match arg(args, 0, "settings needs a subcommand")? {
        "show" => {
            let settings = SettingsService::load_donation_settings(&store)?;
            output::section("Donation Settings");
            for donation_type in &settings.donation_types {
                let state = if donation_type.enabled { "on" } else { "off" };
                output::field(&donation_type.id, format!("{} [{state}]", donation_type.label));
            }
            for frequency in &settings.recurring_frequencies {
                let state = if frequency.enabled { "on" } else { "off" };
                output::field(&frequency.id, format!("{} [{state}]", frequency.label));
            }
            let presets: Vec<String> = settings
                .preset_amounts
                .iter()
                .map(|amount| output::money(*amount))
                .collect();
            output::field("presets", presets.join(", "));
            output::field("minimum", output::money(settings.minimum_amount));
            output::field("receipt prefix", &settings.receipt_prefix);
            Ok(())
        }
        "add-type" => {
            let label = arg(args, 1, "settings add-type needs a label")?;
            let mut settings = SettingsService::load_donation_settings(&store)?;
            if !settings.add_donation_type(label) {
                return Err(usage(&format!(
                    "a donation type with the id `{}` already exists",
                    crate::domain::DonationSettings::slugify(label)
                )));
            }
            SettingsService::save_donation_settings(&store, &SystemClock, config.tz(), &mut settings)?;
            output::success(format!("donation type `{label}` added"));
            Ok(())
        }
        "toggle-type" => {
            let id = arg(args, 1, "settings toggle-type needs an id")?;
            let mut settings = SettingsService::load_donation_settings(&store)?;
            if !settings.toggle_donation_type(id) {
                return Err(usage(&format!("no donation type with id `{id}`")));
            }
            SettingsService::save_donation_settings(&store, &SystemClock, config.tz(), &mut settings)?;
            output::success(format!("donation type `{id}` toggled"));
            Ok(())
        }
        "add-preset" => {
            let amount = parse_amount(arg(args, 1, "settings add-preset needs an amount")?)?;
            let mut settings = SettingsService::load_donation_settings(&store)?;
            if !settings.add_preset_amount(amount) {
                return Err(usage("preset must be positive and not already present"));
            }
            SettingsService::save_donation_settings(&store, &SystemClock, config.tz(), &mut settings)?;
            output::success(format!("preset {} added", output::money(amount)));
            Ok(())
        }
        "remove-preset" => {
            let amount = parse_amount(arg(args, 1, "settings remove-preset needs an amount")?)?;
            let mut settings = SettingsService::load_donation_settings(&store)?;
            if !settings.remove_preset_amount(amount) {
                return Err(usage("no preset with that amount"));
            }
            SettingsService::save_donation_settings(&store, &SystemClock, config.tz(), &mut settings)?;
            output::success(format!("preset {} removed", output::money(amount)));
            Ok(())
        }
        "toggle-frequency" => {
            let id = arg(args, 1, "settings toggle-frequency needs an id")?;
            let mut settings = SettingsService::load_donation_settings(&store)?;
            if !settings.toggle_frequency(id) {
                return Err(usage(&format!("no recurring frequency with id `{id}`")));
            }
            SettingsService::save_donation_settings(&store, &SystemClock, config.tz(), &mut settings)?;
            output::success(format!("frequency `{id}` toggled"));
            Ok(())
        }
        other => Err(usage(&format!("unknown settings subcommand `{other}`"))),
    }
}

fn analytics(args: &[String]) -> Result<(), CliError> {
    let (_, config) = open_store()?;
    match arg(args, 0, "analytics needs `summary` or `export`")? {
        "summary" => {
            let path = PathBuf::from(arg(args, 1, "analytics summary needs a snapshot path")?);
            let snapshot = AnalyticsService::load_snapshot(&path)?;
            let tiles = AnalyticsService::dashboard(&snapshot, &SystemClock, config.tz());
            if let Some(raw) = args.get(2) {
                let period = Period::parse(raw)
                    .ok_or_else(|| usage("period must be today, week, month, or year"))?;
                let tile = match period {
                    Period::Today => tiles.today,
                    Period::Week => tiles.week,
                    Period::Month => tiles.month,
                    Period::Year => tiles.year,
                };
                output::field(raw, output::money(tile.total));
                return Ok(());
            }
            output::section("Donation Summary");
            output::field("today", output::money(tiles.today.total));
            output::field("this week", output::money(tiles.week.total));
            output::field("this month", output::money(tiles.month.total));
            output::field("this year", output::money(tiles.year.total));
            output::field(
                "recurring / month",
                format!(
                    "{} across {} active subscriptions",
                    output::money(tiles.recurring_monthly.round() as i64),
                    tiles.active_subscriptions,
                ),
            );
            Ok(())
        }
        "export" => {
            let path = PathBuf::from(arg(args, 1, "analytics export needs a snapshot path")?);
            let out = args
                .get(2)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("donations.csv"));
            let snapshot = AnalyticsService::load_snapshot(&path)?;
            AnalyticsService::export_csv(&snapshot, &out)?;
            output::success(format!("export written to {}", out.display()));
            Ok(())
        }
        other => Err(usage(&format!("unknown analytics subcommand `{other}`"))),
    }
}

fn backups(args: &[String]) -> Result<(), CliError> {
    let (store, _) = open_store()?;
    let subcommand = arg(args, 0, "backups needs `list`, `create`, or `restore`")?.to_string();
    let document = parse_document(arg(args, 1, "backups needs a document name")?)?;
    match subcommand.as_str() {
        "list" => {
            for name in store.list_backups(document)? {
                output::info(name);
            }
            Ok(())
        }
        "create" => {
            let name = store.backup(document, args.get(2).map(String::as_str))?;
            output::success(format!("backup {name} created"));
            Ok(())
        }
        "restore" => {
            let name = arg(args, 2, "backups restore needs a backup name")?;
            store.restore(document, name)?;
            output::success(format!("{} restored from {name}", document.file_stem()));
            Ok(())
        }
        other => Err(usage(&format!("unknown backups subcommand `{other}`"))),
    }
}

fn parse_document(raw: &str) -> Result<DocumentId, CliError> {
    DocumentId::ALL
        .into_iter()
        .find(|id| id.file_stem() == raw)
        .ok_or_else(|| {
            let names: Vec<&str> = DocumentId::ALL.iter().map(|id| id.file_stem()).collect();
            usage(&format!("document must be one of: {}", names.join(", ")))
        })
}

fn config_cmd(args: &[String]) -> Result<(), CliError> {
    let manager = ConfigManager::new()?;
    match arg(args, 0, "config needs `show` or `set-timezone`")? {
        "show" => {
            let config = manager.load()?;
            output::section("Configuration");
            output::field("timezone", &config.timezone);
            output::field("locale", &config.locale);
            output::field("currency", &config.currency);
            Ok(())
        }
        "set-timezone" => {
            let zone = arg(args, 1, "config set-timezone needs an IANA zone id")?;
            if zone.parse::<chrono_tz::Tz>().is_err() {
                return Err(usage(&format!("`{zone}` is not a known IANA timezone")));
            }
            let mut config = manager.load()?;
            config.timezone = zone.to_string();
            manager.save(&config)?;
            output::success(format!("timezone set to {zone}"));
            Ok(())
        }
        other => Err(usage(&format!("unknown config subcommand `{other}`"))),
    }
}
