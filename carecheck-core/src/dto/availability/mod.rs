//! Provider availability DTOs

use serde::{Deserialize, Serialize};

/// Weekdays on which synthetic providers are made available
pub const WEEKDAYS: [&str; 5] = ["MONDAY", "TUESDAY", "WEDNESDAY", "THURSDAY", "FRIDAY"];

/// Request body for `POST /api/master/provider/availability-setting`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySetting {
    pub set_to_weekdays: bool,
    pub provider_id: String,
    /// Days ahead a booking may be made, as a string
    pub booking_window: String,
    pub timezone: String,
    pub buffer_time: u32,
    pub initial_consult_time: u32,
    pub followup_consult_time: u32,
    pub settings: Vec<SlotSetting>,
    pub block_days: Vec<String>,
    pub day_slots: Vec<DaySlot>,
    #[serde(rename = "xTENANTID")]
    pub x_tenant_id: String,
}

impl AvailabilitySetting {
    /// Monday to Friday, 01:00 to 23:00, virtual visits in 30-minute slots
    /// bookable 12 days ahead
    pub fn weekdays(
        provider_id: impl Into<String>,
        timezone: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        let day_slots = WEEKDAYS
            .iter()
            .map(|day| DaySlot {
                day: day.to_string(),
                start_time: "01:00:00".to_string(),
                end_time: "23:00:00".to_string(),
                availability_mode: "VIRTUAL".to_string(),
            })
            .collect();

        Self {
            set_to_weekdays: true,
            provider_id: provider_id.into(),
            booking_window: "12".to_string(),
            timezone: timezone.into(),
            buffer_time: 0,
            initial_consult_time: 0,
            followup_consult_time: 0,
            settings: vec![SlotSetting {
                slot_type: "NEW".to_string(),
                slot_time: "30".to_string(),
            }],
            block_days: Vec::new(),
            day_slots,
            x_tenant_id: tenant_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSetting {
    #[serde(rename = "type")]
    pub slot_type: String,
    /// Slot length in minutes, as a string
    pub slot_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySlot {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub availability_mode: String,
}
