//! Smart Clinic API
//!
//! Doctor discovery with geo-radius search, appointment booking, a doctor
//! dashboard and conversational health advice backed by a stored
//! lookup-or-generate cache.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use config::StorageBackend;
use domain::{
    AdviceStore, AppointmentRepository, DoctorRepository, PatientRepository, ReverseGeocoder,
    TextCompleter,
};
use infrastructure::{
    account::AccountService,
    advice::{
        AdviceConfig, AdviceService, AdviceTable, ChatService, InMemoryAdviceStore,
        PostgresAdviceStore,
    },
    appointment::{AppointmentService, InMemoryAppointmentRepository, PostgresAppointmentRepository},
    auth::{Argon2Hasher, JwtConfig, JwtGenerator, JwtService},
    completion::{GeminiCompleter, UnconfiguredCompleter},
    doctor::{DoctorSearchService, InMemoryDoctorRepository, PostgresDoctorRepository},
    geocoding::{DisabledGeocoder, NominatimGeocoder},
    http_client::HttpClient,
    patient::{InMemoryPatientRepository, PostgresPatientRepository},
    storage::{run_migrations, PostgresConfig},
};
use rand::Rng;
use tracing::{info, warn};

/// Repositories for whichever backend is configured
struct Repositories {
    patients: Arc<dyn PatientRepository>,
    doctors: Arc<dyn DoctorRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    chat_history: Arc<dyn AdviceStore>,
    remedies: Arc<dyn AdviceStore>,
}

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Storage backend: {:?}", config.storage.backend);

    let repos = match config.storage.backend {
        StorageBackend::Memory => in_memory_repositories(),
        StorageBackend::Postgres => postgres_repositories(config).await?,
    };

    let completer = create_completer(config)?;
    let geocoder = create_geocoder(config)?;
    let jwt_service = create_jwt_service(config);

    let accounts = AccountService::new(
        repos.patients.clone(),
        repos.doctors.clone(),
        Arc::new(Argon2Hasher::new()),
    );

    Ok(AppState {
        accounts: Arc::new(accounts),
        jwt_service,
        appointments: Arc::new(AppointmentService::new(
            repos.appointments,
            repos.doctors.clone(),
        )),
        doctor_search: Arc::new(DoctorSearchService::new(repos.doctors, geocoder)),
        health_advice: Arc::new(AdviceService::new(
            AdviceConfig::health(),
            repos.chat_history,
            completer.clone(),
        )),
        medicine_advice: Arc::new(AdviceService::new(
            AdviceConfig::medicine(),
            repos.remedies,
            completer.clone(),
        )),
        chat: Arc::new(ChatService::new(completer)),
        default_radius_km: config.search.default_radius_km,
    })
}

fn in_memory_repositories() -> Repositories {
    info!("Using in-memory storage");

    let patients: Arc<dyn PatientRepository> = Arc::new(InMemoryPatientRepository::new());

    Repositories {
        appointments: Arc::new(InMemoryAppointmentRepository::new(patients.clone())),
        patients,
        doctors: Arc::new(InMemoryDoctorRepository::new()),
        chat_history: Arc::new(InMemoryAdviceStore::new()),
        remedies: Arc::new(InMemoryAdviceStore::new()),
    }
}

async fn postgres_repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    let database_url = config.storage.database_url.clone().ok_or_else(|| {
        anyhow::anyhow!("storage.database_url (or DATABASE_URL) is required for postgres storage")
    })?;

    info!("Connecting to PostgreSQL...");
    let pool = PostgresConfig::new(database_url)
        .with_max_connections(config.storage.max_connections)
        .with_min_connections(config.storage.min_connections)
        .connect()
        .await?;
    info!("PostgreSQL connection established");

    if config.storage.run_migrations {
        run_migrations(&pool).await?;
    }

    Ok(Repositories {
        patients: Arc::new(PostgresPatientRepository::new(pool.clone())),
        doctors: Arc::new(PostgresDoctorRepository::new(pool.clone())),
        appointments: Arc::new(PostgresAppointmentRepository::new(pool.clone())),
        chat_history: Arc::new(PostgresAdviceStore::new(
            pool.clone(),
            AdviceTable::CHAT_HISTORY,
        )),
        remedies: Arc::new(PostgresAdviceStore::new(pool, AdviceTable::REMEDIES)),
    })
}

fn create_completer(config: &AppConfig) -> anyhow::Result<Arc<dyn TextCompleter>> {
    let settings = &config.completion;

    let Some(api_key) = settings.api_key.clone().filter(|k| !k.trim().is_empty()) else {
        warn!("No completion API key configured. Uncached advice and chat will be unavailable.");
        return Ok(Arc::new(UnconfiguredCompleter));
    };

    let client = HttpClient::with_timeout(Duration::from_secs(settings.timeout_secs))?;
    info!(model = %settings.model, "Using Gemini text completion");

    Ok(Arc::new(GeminiCompleter::with_base_url(
        client,
        api_key,
        settings.model.clone(),
        settings.base_url.clone(),
    )))
}

fn create_geocoder(config: &AppConfig) -> anyhow::Result<Arc<dyn ReverseGeocoder>> {
    let settings = &config.geocoding;

    if !settings.enabled {
        info!("Reverse geocoding disabled");
        return Ok(Arc::new(DisabledGeocoder));
    }

    let client = HttpClient::with_timeout(Duration::from_secs(settings.timeout_secs))?;

    Ok(Arc::new(NominatimGeocoder::with_base_url(
        client,
        settings.base_url.clone(),
        settings.user_agent.clone(),
    )))
}

fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// JWT service from the configured secret, or a random one that lasts until restart
fn create_jwt_service(config: &AppConfig) -> Arc<dyn JwtGenerator> {
    let secret = match config.auth.jwt_secret.clone().filter(|s| !s.is_empty()) {
        Some(secret) => secret,
        None => {
            warn!(
                "No auth.jwt_secret configured. Generating a random secret; \
                 issued tokens will not survive a restart."
            );
            generate_random_secret()
        }
    };

    Arc::new(JwtService::new(JwtConfig::new(
        secret,
        config.auth.expiration_hours,
    )))
}
