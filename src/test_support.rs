//! Shared helpers for unit tests.

use crate::message::TutorRequest;
use axum::Router;

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn sample_request(sender: &str) -> TutorRequest {
    TutorRequest {
        pdf: "https://ncert.nic.in/textbook/pdf/hesc111.pdf".to_string(),
        success: true,
        question: "Why do we see our image in a mirror?".to_string(),
        chapter: "Light".to_string(),
        subject: "Science".to_string(),
        standard: "8".to_string(),
        sender: sender.to_string(),
    }
}
