use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::facility::FacilityRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::reservation::ReservationRepositoryImpl;
use adapter::repository::spot::SpotRepositoryImpl;
use adapter::repository::user::UserRepositoryImpl;
use kernel::repository::facility::FacilityRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::reservation::ReservationRepository;
use kernel::repository::spot::SpotRepository;
use kernel::repository::user::UserRepository;
use shared::auth::TokenCodec;
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    user_repository: Arc<dyn UserRepository>,
    facility_repository: Arc<dyn FacilityRepository>,
    spot_repository: Arc<dyn SpotRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    token_codec: Arc<TokenCodec>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: &AppConfig) -> Self {
        Self::with_repositories(
            Arc::new(HealthCheckRepositoryImpl::new(pool.clone())),
            Arc::new(UserRepositoryImpl::new(pool.clone())),
            Arc::new(FacilityRepositoryImpl::new(pool.clone())),
            Arc::new(SpotRepositoryImpl::new(pool.clone())),
            Arc::new(ReservationRepositoryImpl::new(pool)),
            TokenCodec::new(&app_config.auth),
        )
    }

    // Repositories are injected, never reached through process-wide state,
    // so tests can swap in substitute stores.
    pub fn with_repositories(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        user_repository: Arc<dyn UserRepository>,
        facility_repository: Arc<dyn FacilityRepository>,
        spot_repository: Arc<dyn SpotRepository>,
        reservation_repository: Arc<dyn ReservationRepository>,
        token_codec: TokenCodec,
    ) -> Self {
        Self {
            health_check_repository,
            user_repository,
            facility_repository,
            spot_repository,
            reservation_repository,
            token_codec: Arc::new(token_codec),
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn facility_repository(&self) -> Arc<dyn FacilityRepository> {
        self.facility_repository.clone()
    }

    pub fn spot_repository(&self) -> Arc<dyn SpotRepository> {
        self.spot_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn token_codec(&self) -> Arc<TokenCodec> {
        self.token_codec.clone()
    }
}
