use async_trait::async_trait;
use chrono::NaiveDate;
use medsched_core::{
    models::{
        booking::{Booking, BookingStatus},
        schedule::WeeklyTemplate,
    },
    store::{BookingStore, TemplateStore},
};
use mockall::mock;
use uuid::Uuid;

// Mock stores for testing
mock! {
    pub TemplateRepo {}

    #[async_trait]
    impl TemplateStore for TemplateRepo {
        async fn find_template_by_subject(
            &self,
            subject_id: Uuid,
        ) -> eyre::Result<Option<WeeklyTemplate>>;

        async fn save_template(
            &self,
            template: &WeeklyTemplate,
        ) -> eyre::Result<WeeklyTemplate>;

        async fn delete_template(
            &self,
            subject_id: Uuid,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingStore for BookingRepo {
        async fn find_bookings(
            &self,
            subject_id: Uuid,
            from: NaiveDate,
            to: NaiveDate,
            statuses: &[BookingStatus],
        ) -> eyre::Result<Vec<Booking>>;
    }
}
