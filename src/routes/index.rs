use axum::{extract::State, response::IntoResponse};

use crate::{routes::AppState, template::render};

pub struct Stat {
    pub value: u32,
    pub suffix: &'static str,
    pub label: &'static str,
}

const STATS: [Stat; 3] = [
    Stat {
        value: 30,
        suffix: "+",
        label: "Yıllık Deneyim",
    },
    Stat {
        value: 500,
        suffix: "+",
        label: "Proje",
    },
    Stat {
        value: 100,
        suffix: "%",
        label: "Müşteri Memnuniyeti",
    },
];

const SERVICES: [&str; 8] = [
    "Malzemeli Taahhüt",
    "Orta Gerilim",
    "Alçak Gerilim",
    "Pano İmalatı",
    "Malzeme Satışı",
    "Mühendislik",
    "Güneş Enerjisi",
    "Enerji Depolama",
];

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub contact_address: &'a str,
    pub stats: &'a [Stat],
    pub services: &'a [&'a str],
}

pub async fn page(State(app_state): State<AppState>) -> impl IntoResponse {
    render(IndexTemplate {
        contact_address: &app_state.config.email.contact_address,
        stats: &STATS,
        services: &SERVICES,
    })
}
