pub mod campaign;
pub mod common;
pub mod donation;
pub mod event;
pub mod jumuah;
pub mod mosque;
pub mod prayer;

pub use campaign::{Campaign, CampaignStatus};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use donation::{
    AnalyticsSnapshot, AnalyticsSummary, DonationRecord, DonationSettings, DonationType,
    Frequency, FrequencyOption, MonthBucket, PaymentStatus, RecurringDonation,
    SubscriptionStatus,
};
pub use event::{Event, EventCategory};
pub use jumuah::{JumuahSchedule, JumuahSession};
pub use mosque::MosqueProfile;
pub use prayer::{
    IqamaRule, Prayer, PrayerEntry, PrayerSchedule, TimeField, MAX_IQAMA_OFFSET_MINUTES,
};
