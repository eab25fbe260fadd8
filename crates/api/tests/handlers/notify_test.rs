use std::{sync::Arc, time::Duration};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use pretty_assertions::assert_eq;
use roombook_api::notify::WebhookNotifier;
use roombook_core::{
    errors::BookingError,
    models::{
        booking::{Booking, BookingStatus},
        room::Room,
    },
    notify::{BookingNotification, Notifier},
};
use tokio::{net::TcpListener, sync::Mutex};
use uuid::Uuid;

type Received = Arc<Mutex<Vec<BookingNotification>>>;

async fn receiver(status: StatusCode) -> (String, Received) {
    let received: Received = Arc::default();

    let app = Router::new()
        .route(
            "/hook",
            post(
                move |State(received): State<Received>, Json(body): Json<BookingNotification>| async move {
                    received.lock().await.push(body);
                    status
                },
            ),
        )
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });

    (format!("http://{addr}/hook"), received)
}

fn confirmed() -> (Booking, Room) {
    let room = Room::new("Discussion Room", 3);
    let booking = Booking {
        id: Uuid::new_v4(),
        full_name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        room_id: room.id,
        date: chrono::NaiveDate::from_ymd_opt(2031, 3, 14).unwrap(),
        start_time: chrono::NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
        end_time: chrono::NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        status: BookingStatus::Booked,
        created_at: chrono::Utc::now(),
    };
    (booking, room)
}

#[tokio::test]
async fn test_webhook_receives_notification() {
    let (url, received) = receiver(StatusCode::NO_CONTENT).await;
    let notifier = WebhookNotifier::new(
        url,
        Some("admin@example.com".to_string()),
        Duration::from_secs(5),
    )
    .unwrap();
    let (booking, room) = confirmed();

    notifier.on_booking_confirmed(&booking, &room).await.unwrap();

    let received = received.lock().await;
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].guest_subject,
        "Booking Confirmed: Discussion Room on March 14, 2031 at 01:30 PM"
    );
    assert_eq!(received[0].admin_email.as_deref(), Some("admin@example.com"));
    assert_eq!(received[0].time_range, "01:30 PM - 02:30 PM");
}

#[tokio::test]
async fn test_webhook_failure_status_is_an_error() {
    let (url, _received) = receiver(StatusCode::BAD_GATEWAY).await;
    let notifier = WebhookNotifier::new(url, None, Duration::from_secs(5)).unwrap();
    let (booking, room) = confirmed();

    let result = notifier.on_booking_confirmed(&booking, &room).await;

    assert!(matches!(result, Err(BookingError::Notification(_))));
}
