//! Appointment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::slot::{TimeRange, format_timestamp};

/// Request body for `POST /api/master/appointment`
///
/// The service mixes camelCase and snake_case field names; each field is
/// renamed explicitly where the two differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointment {
    pub mode: String,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    #[serde(rename = "customForms")]
    pub custom_forms: Option<Vec<String>>,
    pub visit_type: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    #[serde(rename = "paymentType")]
    pub payment_type: String,
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    pub insurance_type: String,
    pub note: String,
    pub authorization: String,
    pub forms: Vec<String>,
    #[serde(rename = "chiefComplaint")]
    pub chief_complaint: String,
    #[serde(rename = "isRecurring")]
    pub is_recurring: bool,
    #[serde(rename = "recurringFrequency")]
    pub recurring_frequency: String,
    pub reminder_set: bool,
    #[serde(rename = "endType")]
    pub end_type: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    #[serde(rename = "endAfter")]
    pub end_after: u32,
    #[serde(rename = "customFrequency")]
    pub custom_frequency: u32,
    #[serde(rename = "customFrequencyUnit")]
    pub custom_frequency_unit: String,
    #[serde(rename = "selectedWeekdays")]
    pub selected_weekdays: Vec<String>,
    pub reminder_before_number: u32,
    pub timezone: String,
    /// Minutes
    pub duration: u32,
    #[serde(rename = "xTENANTID")]
    pub x_tenant_id: String,
}

/// Values that vary per booking
#[derive(Debug, Clone)]
pub struct BookingRequest<'a> {
    pub provider_id: &'a str,
    pub patient_id: &'a str,
    pub range: &'a TimeRange,
    pub timezone: &'a str,
    pub tenant_id: &'a str,
    pub now: DateTime<Utc>,
}

impl CreateAppointment {
    /// A one-off, non-recurring virtual visit for a new patient paid in cash
    pub fn virtual_visit(req: BookingRequest<'_>) -> Self {
        Self {
            mode: "VIRTUAL".to_string(),
            patient_id: req.patient_id.to_string(),
            custom_forms: None,
            visit_type: String::new(),
            appointment_type: "NEW".to_string(),
            payment_type: "CASH".to_string(),
            provider_id: req.provider_id.to_string(),
            start_time: req.range.start.clone(),
            end_time: req.range.end.clone(),
            insurance_type: String::new(),
            note: String::new(),
            authorization: String::new(),
            forms: Vec::new(),
            chief_complaint: "Fever and headache".to_string(),
            is_recurring: false,
            recurring_frequency: "daily".to_string(),
            reminder_set: false,
            end_type: "never".to_string(),
            end_date: format_timestamp(req.now),
            end_after: 5,
            custom_frequency: 1,
            custom_frequency_unit: "days".to_string(),
            selected_weekdays: Vec::new(),
            reminder_before_number: 1,
            timezone: req.timezone.to_string(),
            duration: 30,
            x_tenant_id: req.tenant_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_virtual_visit_wire_shape() {
        let range = TimeRange::new("2025-08-06T03:30:00Z", "2025-08-06T04:00:00Z");
        let now = Utc.with_ymd_and_hms(2025, 8, 5, 10, 0, 0).unwrap();
        let body = CreateAppointment::virtual_visit(BookingRequest {
            provider_id: "prov",
            patient_id: "pat",
            range: &range,
            timezone: "IST",
            tenant_id: "tenant",
            now,
        });
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["providerId"], "prov");
        assert_eq!(json["patientId"], "pat");
        assert_eq!(json["startTime"], "2025-08-06T03:30:00Z");
        assert_eq!(json["type"], "NEW");
        assert_eq!(json["paymentType"], "CASH");
        assert_eq!(json["isRecurring"], false);
        assert_eq!(json["visit_type"], "");
        assert_eq!(json["endDate"], "2025-08-05T10:00:00.000Z");
        assert_eq!(json["xTENANTID"], "tenant");
        assert!(json["customForms"].is_null());
    }
}
