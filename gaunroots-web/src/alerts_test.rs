//! Tests for the alert subscription and disease report flows
//!
//! Form validation runs without a backend; submissions run against the
//! in-process stub backend with a mocked notifier.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::{GaunRootsClient, testing::StubBackend, validation::PhoneNumberError};

    use crate::alerts::{
        AlertFlow, ReportForm, SubmitError, SubscriptionForm, build_registration, build_report,
        describe_alert,
    };
    use crate::notifications::{MockNotifier, Notification, NotificationLevel};

    fn subscription() -> SubscriptionForm {
        SubscriptionForm {
            farmer_name: "Sita Tamang".into(),
            phone_number: "984-123 4567".into(),
            crop_types: "rice, maize".into(),
            alert_radius: "25".into(),
        }
    }

    fn report() -> ReportForm {
        ReportForm {
            disease_name: "Late Blight".into(),
            crop_type: "Tomato".into(),
            severity: "high".into(),
            description: "Dark lesions on leaves".into(),
            reporter_phone: "+977 984 123 4567".into(),
        }
    }

    fn flow_for(backend: &StubBackend, notifier: MockNotifier) -> AlertFlow<MockNotifier> {
        AlertFlow::new(GaunRootsClient::new(&backend.base_url()).unwrap(), notifier)
    }

    fn expect_one(notifier: &mut MockNotifier, level: NotificationLevel, message: &'static str) {
        notifier
            .expect_notify()
            .withf(move |n: &Notification| n.level == level && n.message == message)
            .times(1)
            .return_const(());
    }

    /// Tests the registration payload built from a valid form
    #[test]
    fn test_build_registration_normalizes_phone() {
        let registration = build_registration(&subscription()).unwrap();
        assert_eq!(registration.farmer_name, "Sita Tamang");
        assert_eq!(registration.phone_number, "9841234567");
        assert_eq!(registration.crop_types, "rice, maize");
        assert_eq!(registration.alert_radius, 25);
    }

    /// Tests the radius fallback for an unparseable select value
    #[test]
    fn test_build_registration_default_radius() {
        let form = SubscriptionForm {
            alert_radius: "far".into(),
            ..subscription()
        };
        assert_eq!(build_registration(&form).unwrap().alert_radius, 10);
    }

    /// Tests that a blank name is rejected
    #[test]
    fn test_build_registration_requires_name() {
        let form = SubscriptionForm {
            farmer_name: "  ".into(),
            ..subscription()
        };
        let err = build_registration(&form).unwrap_err();
        assert!(matches!(err, SubmitError::MissingField("name")));
        assert!(err.is_validation());
    }

    /// Tests the report payload: blank description dropped, phone normalized
    #[test]
    fn test_build_report_normalizes_fields() {
        let form = ReportForm {
            description: " ".into(),
            ..report()
        };
        let built = build_report(&form).unwrap();
        assert_eq!(built.description, None);
        assert_eq!(built.reporter_phone, "+9779841234567");
        assert_eq!(
            serde_json::to_value(&built).unwrap()["reporterPhone"],
            "+9779841234567"
        );
    }

    /// Tests that the reporter phone is required
    #[test]
    fn test_build_report_requires_phone() {
        let form = ReportForm {
            reporter_phone: "  ".into(),
            ..report()
        };
        let err = build_report(&form).unwrap_err();
        assert!(matches!(
            err,
            SubmitError::InvalidPhone(PhoneNumberError::Empty)
        ));
        assert!(err.is_validation());
    }

    /// Tests alert summaries for the recent list
    #[test]
    fn test_describe_alert() {
        let alert = json!({
            "diseaseName": "Late Blight",
            "cropType": "Tomato",
            "severity": "high",
            "location": "Kathmandu Valley"
        });
        assert_eq!(
            describe_alert(&alert),
            "Late Blight on Tomato (high) - Kathmandu Valley"
        );
        assert_eq!(
            describe_alert(&json!({"diseaseName": "Rust", "cropType": "Wheat"})),
            "Rust on Wheat"
        );
    }

    /// Tests that an invalid phone number never reaches the backend
    #[tokio::test]
    async fn test_subscribe_invalid_phone_sends_nothing() {
        let backend = StubBackend::builder().start().await;
        let mut notifier = MockNotifier::new();
        expect_one(
            &mut notifier,
            NotificationLevel::Error,
            "Please enter a valid phone number (10-15 digits, optional leading +)",
        );
        let form = SubscriptionForm {
            phone_number: "12345".into(),
            ..subscription()
        };

        let err = flow_for(&backend, notifier).subscribe(&form).await.unwrap_err();

        assert!(matches!(err, SubmitError::InvalidPhone(_)));
        assert!(backend.requests().is_empty());
    }

    /// Tests a successful subscription with the server's message
    #[tokio::test]
    async fn test_subscribe_success_uses_server_message() {
        let response = json!({
            "success": true,
            "message": "Alert registration successful for Kathmandu Valley"
        });
        let backend = StubBackend::builder()
            .json("POST", "/api/register-alerts", &response)
            .start()
            .await;
        let mut notifier = MockNotifier::new();
        expect_one(
            &mut notifier,
            NotificationLevel::Success,
            "Alert registration successful for Kathmandu Valley",
        );

        let outcome = flow_for(&backend, notifier)
            .subscribe(&subscription())
            .await
            .unwrap();

        assert_eq!(outcome.response, response);
        assert!(outcome.reset_form);
        assert!(!outcome.close_modal);
        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body,
            json!({
                "farmerName": "Sita Tamang",
                "phoneNumber": "9841234567",
                "cropTypes": "rice, maize",
                "alertRadius": 25
            })
        );
    }

    /// Tests the default success message
    #[tokio::test]
    async fn test_subscribe_success_default_message() {
        let backend = StubBackend::builder()
            .json("POST", "/api/register-alerts", &json!({"success": true}))
            .start()
            .await;
        let mut notifier = MockNotifier::new();
        expect_one(
            &mut notifier,
            NotificationLevel::Success,
            "Successfully registered for disease alerts",
        );

        flow_for(&backend, notifier)
            .subscribe(&subscription())
            .await
            .unwrap();
    }

    /// Tests that a rejected subscription surfaces the server detail
    #[tokio::test]
    async fn test_subscribe_rejected_notifies_error() {
        let backend = StubBackend::builder()
            .route(
                "POST",
                "/api/register-alerts",
                500,
                r#"{"detail":"Registration error: disk full"}"#,
            )
            .start()
            .await;
        let mut notifier = MockNotifier::new();
        expect_one(
            &mut notifier,
            NotificationLevel::Error,
            "Registration error: disk full",
        );

        let err = flow_for(&backend, notifier)
            .subscribe(&subscription())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Api(_)));
        assert!(!err.is_validation());
    }

    /// Tests that a report refreshes the recent list and closes the modal
    #[tokio::test]
    async fn test_report_refreshes_recent_alerts() {
        let alerts = json!([{"diseaseName": "Late Blight", "cropType": "Tomato"}]);
        let backend = StubBackend::builder()
            .json(
                "POST",
                "/api/report-disease",
                &json!({"message": "Disease report submitted for Kathmandu Valley"}),
            )
            .json(
                "GET",
                "/api/recent-alerts",
                &json!({"success": true, "alerts": alerts.clone()}),
            )
            .start()
            .await;
        let mut notifier = MockNotifier::new();
        expect_one(
            &mut notifier,
            NotificationLevel::Success,
            "Disease report submitted for Kathmandu Valley",
        );
        let flow = flow_for(&backend, notifier);

        let outcome = flow.report(&report()).await.unwrap();

        assert!(outcome.reset_form);
        assert!(outcome.close_modal);
        assert_eq!(serde_json::Value::Array(flow.recent_alerts()), alerts);
        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].path, "/api/report-disease");
        assert!(requests[0].body.get("location").is_none());
        assert_eq!(requests[0].body["reporterPhone"], "+9779841234567");
        assert_eq!(requests[1].method, "GET");
        assert_eq!(requests[1].path, "/api/recent-alerts");
    }

    /// Tests that a blank reporter phone never reaches the backend
    #[tokio::test]
    async fn test_report_blank_phone_sends_nothing() {
        let backend = StubBackend::builder().start().await;
        let mut notifier = MockNotifier::new();
        expect_one(
            &mut notifier,
            NotificationLevel::Error,
            "Please enter a phone number",
        );
        let form = ReportForm {
            reporter_phone: String::new(),
            ..report()
        };

        let err = flow_for(&backend, notifier).report(&form).await.unwrap_err();

        assert!(matches!(err, SubmitError::InvalidPhone(PhoneNumberError::Empty)));
        assert!(backend.requests().is_empty());
    }

    /// Tests an invalid reporter phone
    #[tokio::test]
    async fn test_report_invalid_reporter_phone_sends_nothing() {
        let backend = StubBackend::builder().start().await;
        let mut notifier = MockNotifier::new();
        expect_one(
            &mut notifier,
            NotificationLevel::Error,
            "Please enter a valid phone number (10-15 digits, optional leading +)",
        );
        let form = ReportForm {
            reporter_phone: "abc1234567".into(),
            ..report()
        };

        let result = flow_for(&backend, notifier).report(&form).await;

        assert!(result.is_err());
        assert!(backend.requests().is_empty());
    }

    /// Tests that a failed refresh keeps the previous list without notifying
    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_list() {
        let backend = StubBackend::builder()
            .route("GET", "/api/recent-alerts", 500, "oops")
            .start()
            .await;
        let flow = flow_for(&backend, MockNotifier::new());
        let previous = vec![json!({"diseaseName": "Rust", "cropType": "Wheat"})];
        flow.seed_recent(previous.clone());

        assert!(!flow.refresh_recent(Some("Kathmandu")).await);
        assert_eq!(flow.recent_alerts(), previous);
        assert_eq!(backend.requests()[0].query.as_deref(), Some("location=Kathmandu"));
    }
}
