//! In-memory substitutes for the kernel repository traits, used by the
//! handler tests. Each fake mirrors the storage-level contract of its
//! Postgres counterpart, including the single-active-reservation guard.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use kernel::model::{
    facility::{event::CreateFacility, Facility, FacilitySummary, FacilityWithAvailability},
    id::{FacilityId, ReservationId, UserId},
    reservation::{
        event::{CancelReservation, CreateReservation},
        Reservation, ReservationStatus,
    },
    spot::{BulkSpotOutcome, Spot, SpotSummary},
    tier::Tier,
    user::{event::CreateUser, User},
};
use kernel::repository::{
    facility::FacilityRepository, health::HealthCheckRepository,
    reservation::ReservationRepository, spot::SpotRepository, user::UserRepository,
};
use registry::AppRegistry;
use shared::auth::TokenCodec;
use shared::config::AuthConfig;
use shared::error::{AppError, AppResult};

pub struct AlwaysHealthy;

#[async_trait]
impl HealthCheckRepository for AlwaysHealthy {
    async fn check_db(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<(User, String)>>,
}

impl InMemoryUserRepository {
    pub fn promote(&self, user_id: UserId) {
        let mut users = self.users.lock().unwrap();
        if let Some((user, _)) = users.iter_mut().find(|(u, _)| u.id == user_id) {
            user.tier = Tier::Privileged;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|(u, _)| u.email == event.email) {
            return Err(AppError::EmailAlreadyRegistered);
        }
        let user = User {
            id: UserId::new(users.len() as i64 + 1),
            email: event.email,
            tier: Tier::Standard,
        };
        users.push((user.clone(), event.password));
        Ok(user)
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, p)| u.email == email && p == password)
            .map(|(u, _)| u.clone())
            .ok_or(AppError::InvalidCredentials)
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.id == user_id)
            .map(|(u, _)| u.clone()))
    }
}

#[derive(Default)]
pub struct InMemorySpotRepository {
    spots: Mutex<BTreeMap<(i64, i32), bool>>,
}

#[async_trait]
impl SpotRepository for InMemorySpotRepository {
    async fn initialize(&self, facility_id: FacilityId, count: i32) -> AppResult<()> {
        let mut spots = self.spots.lock().unwrap();
        for number in 1..=count {
            spots.entry((facility_id.raw(), number)).or_insert(false);
        }
        Ok(())
    }

    async fn set_occupied(
        &self,
        facility_id: FacilityId,
        number: i32,
        occupied: bool,
    ) -> AppResult<()> {
        match self
            .spots
            .lock()
            .unwrap()
            .get_mut(&(facility_id.raw(), number))
        {
            Some(state) => {
                *state = occupied;
                Ok(())
            }
            None => Err(AppError::EntityNotFound("specified spot not found".into())),
        }
    }

    async fn bulk_set(
        &self,
        facility_id: FacilityId,
        states: Vec<Spot>,
    ) -> AppResult<BulkSpotOutcome> {
        let mut spots = self.spots.lock().unwrap();
        let mut outcome = BulkSpotOutcome::default();
        for state in states {
            spots.insert((facility_id.raw(), state.number), state.occupied);
            outcome.applied += 1;
        }
        Ok(outcome)
    }

    async fn find_by_facility(&self, facility_id: FacilityId) -> AppResult<Vec<Spot>> {
        Ok(self
            .spots
            .lock()
            .unwrap()
            .range((facility_id.raw(), i32::MIN)..=(facility_id.raw(), i32::MAX))
            .map(|(&(_, number), &occupied)| Spot { number, occupied })
            .collect())
    }

    async fn count_occupied(&self, facility_id: FacilityId) -> AppResult<i64> {
        Ok(self
            .spots
            .lock()
            .unwrap()
            .iter()
            .filter(|(&(fid, _), &occupied)| fid == facility_id.raw() && occupied)
            .count() as i64)
    }
}

pub struct InMemoryFacilityRepository {
    facilities: Mutex<Vec<Facility>>,
    spots: Arc<InMemorySpotRepository>,
}

impl InMemoryFacilityRepository {
    pub fn new(spots: Arc<InMemorySpotRepository>) -> Self {
        Self {
            facilities: Mutex::new(Vec::new()),
            spots,
        }
    }

    pub fn exists(&self, facility_id: FacilityId) -> bool {
        self.facilities
            .lock()
            .unwrap()
            .iter()
            .any(|f| f.id == facility_id)
    }
}

#[async_trait]
impl FacilityRepository for InMemoryFacilityRepository {
    async fn create(&self, event: CreateFacility) -> AppResult<FacilityId> {
        let mut facilities = self.facilities.lock().unwrap();
        let id = FacilityId::new(facilities.len() as i64 + 1);
        facilities.push(Facility {
            id,
            owner_id: event.owner_id,
            name: event.name,
            capacity: event.capacity,
            latitude: event.latitude,
            longitude: event.longitude,
            price_per_hour: event.price_per_hour,
            covered: event.covered,
            amenities: event.amenities,
            restroom: event.restroom,
            max_height_m: event.max_height_m,
            created_at: Utc::now(),
            opening_windows: event.opening_windows,
        });
        Ok(id)
    }

    async fn find_owned_by(&self, user_id: UserId) -> AppResult<Vec<FacilitySummary>> {
        Ok(self
            .facilities
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.owner_id == user_id)
            .map(|f| FacilitySummary {
                id: f.id,
                name: f.name.clone(),
                capacity: f.capacity,
                latitude: f.latitude,
                longitude: f.longitude,
            })
            .collect())
    }

    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>> {
        Ok(self
            .facilities
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == facility_id)
            .cloned())
    }

    async fn find_all_with_availability(&self) -> AppResult<Vec<FacilityWithAvailability>> {
        let facilities = self.facilities.lock().unwrap().clone();
        let mut out = Vec::with_capacity(facilities.len());
        for f in facilities {
            let occupied = self.spots.count_occupied(f.id).await?;
            out.push(FacilityWithAvailability {
                summary: FacilitySummary {
                    id: f.id,
                    name: f.name,
                    capacity: f.capacity,
                    latitude: f.latitude,
                    longitude: f.longitude,
                },
                availability: SpotSummary::from_counts(f.capacity, occupied),
            });
        }
        Ok(out)
    }

    async fn is_owner(&self, facility_id: FacilityId, user_id: UserId) -> bool {
        self.facilities
            .lock()
            .unwrap()
            .iter()
            .any(|f| f.id == facility_id && f.owner_id == user_id)
    }
}

pub struct InMemoryReservationRepository {
    reservations: Mutex<Vec<Reservation>>,
    facilities: Arc<InMemoryFacilityRepository>,
}

impl InMemoryReservationRepository {
    pub fn new(facilities: Arc<InMemoryFacilityRepository>) -> Self {
        Self {
            reservations: Mutex::new(Vec::new()),
            facilities,
        }
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        if !self.facilities.exists(event.facility_id) {
            return Err(AppError::EntityNotFound("facility not found".into()));
        }
        let mut reservations = self.reservations.lock().unwrap();
        let already_active = reservations.iter().any(|r| {
            r.user_id == event.user_id
                && r.facility_id == event.facility_id
                && r.status == ReservationStatus::Active
        });
        if already_active {
            return Err(AppError::ReservationConflict);
        }
        let id = ReservationId::new(reservations.len() as i64 + 1);
        reservations.push(Reservation {
            id,
            user_id: event.user_id,
            facility_id: event.facility_id,
            status: ReservationStatus::Active,
            reserved_at: Utc::now(),
            canceled_at: None,
        });
        Ok(id)
    }

    async fn cancel(&self, event: CancelReservation) -> AppResult<()> {
        let mut reservations = self.reservations.lock().unwrap();
        match reservations.iter_mut().find(|r| {
            r.user_id == event.user_id
                && r.facility_id == event.facility_id
                && r.status == ReservationStatus::Active
        }) {
            Some(reservation) => {
                reservation.status = ReservationStatus::Canceled;
                reservation.canceled_at = Some(event.canceled_at);
                Ok(())
            }
            None => Err(AppError::EntityNotFound(
                "no active reservation for this facility".into(),
            )),
        }
    }

    async fn find_active(
        &self,
        user_id: UserId,
        facility_id: FacilityId,
    ) -> AppResult<Option<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .find(|r| {
                r.user_id == user_id
                    && r.facility_id == facility_id
                    && r.status == ReservationStatus::Active
            })
            .cloned())
    }
}

pub struct TestApp {
    pub registry: AppRegistry,
    pub users: Arc<InMemoryUserRepository>,
}

pub fn test_app() -> TestApp {
    let users = Arc::new(InMemoryUserRepository::default());
    let spots = Arc::new(InMemorySpotRepository::default());
    let facilities = Arc::new(InMemoryFacilityRepository::new(spots.clone()));
    let reservations = Arc::new(InMemoryReservationRepository::new(facilities.clone()));
    let token_codec = TokenCodec::new(&AuthConfig {
        jwt_secret: Some("test-secret".into()),
        token_ttl_hours: 24,
    });
    let registry = AppRegistry::with_repositories(
        Arc::new(AlwaysHealthy),
        users.clone(),
        facilities,
        spots,
        reservations,
        token_codec,
    );
    TestApp { registry, users }
}
