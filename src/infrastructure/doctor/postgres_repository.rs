//! PostgreSQL doctor repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::{DoctorRecord, DoctorRepository, DoctorSearchFilter, DomainError};
use crate::infrastructure::storage::map_insert_error;

const DOCTOR_COLUMNS: &str = "id, name, email, password_hash, specialization, hospital_name, \
     city, area, experience, latitude, longitude, created_at";

/// PostgreSQL implementation of DoctorRepository
#[derive(Debug, Clone)]
pub struct PostgresDoctorRepository {
    pool: PgPool,
}

impl PostgresDoctorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_optional(
        &self,
        query: sqlx::query::Query<'_, Postgres, sqlx::postgres::PgArguments>,
    ) -> Result<Option<DoctorRecord>, DomainError> {
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get doctor: {}", e)))?;

        row.as_ref().map(row_to_doctor).transpose()
    }
}

/// Build the attribute-filter query; substring matches are case-insensitive
fn search_query(filter: &DoctorSearchFilter) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {} FROM doctors WHERE 1=1", DOCTOR_COLUMNS));

    if let Some(ref specialization) = filter.specialization {
        query
            .push(" AND strpos(lower(specialization), lower(")
            .push_bind(specialization)
            .push(")) > 0");
    }

    if let Some(ref location) = filter.location {
        query.push(" AND (");
        for (i, column) in ["hospital_name", "city", "area"].into_iter().enumerate() {
            if i > 0 {
                query.push(" OR ");
            }
            query
                .push(format!("strpos(lower(coalesce({}, '')), lower(", column))
                .push_bind(location)
                .push(")) > 0");
        }
        query.push(")");
    }

    if let Some(years) = filter.min_experience {
        query.push(" AND experience >= ").push_bind(years);
    }

    query.push(" ORDER BY id");
    query
}

#[async_trait]
impl DoctorRepository for PostgresDoctorRepository {
    async fn get(&self, id: i64) -> Result<Option<DoctorRecord>, DomainError> {
        let sql = format!("SELECT {} FROM doctors WHERE id = $1", DOCTOR_COLUMNS);
        self.fetch_optional(sqlx::query(&sql).bind(id)).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<DoctorRecord>, DomainError> {
        let sql = format!("SELECT {} FROM doctors WHERE email = $1", DOCTOR_COLUMNS);
        self.fetch_optional(sqlx::query(&sql).bind(email)).await
    }

    async fn create(&self, mut doctor: DoctorRecord) -> Result<DoctorRecord, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO doctors (name, email, password_hash, specialization, hospital_name,
                                 city, area, experience, latitude, longitude, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&doctor.name)
        .bind(&doctor.email)
        .bind(&doctor.password_hash)
        .bind(&doctor.specialization)
        .bind(&doctor.hospital_name)
        .bind(&doctor.city)
        .bind(&doctor.area)
        .bind(doctor.experience)
        .bind(doctor.latitude)
        .bind(doctor.longitude)
        .bind(doctor.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(e, "doctor", || {
                format!("Email '{}' is already registered", doctor.email)
            })
        })?;

        doctor.id = id;
        Ok(doctor)
    }

    async fn search(&self, filter: &DoctorSearchFilter) -> Result<Vec<DoctorRecord>, DomainError> {
        let rows = search_query(filter)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to search doctors: {}", e)))?;

        rows.iter().map(row_to_doctor).collect()
    }

    async fn list_by_specialization(
        &self,
        specialization: Option<&str>,
    ) -> Result<Vec<DoctorRecord>, DomainError> {
        let rows = match specialization {
            Some(specialization) => {
                let sql = format!(
                    "SELECT {} FROM doctors WHERE specialization = $1 ORDER BY name",
                    DOCTOR_COLUMNS
                );
                sqlx::query(&sql)
                    .bind(specialization)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!("SELECT {} FROM doctors ORDER BY name", DOCTOR_COLUMNS);
                sqlx::query(&sql).fetch_all(&self.pool).await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to list doctors: {}", e)))?;

        rows.iter().map(row_to_doctor).collect()
    }

    async fn specializations(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar("SELECT DISTINCT specialization FROM doctors ORDER BY specialization")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list specializations: {}", e)))
    }

    async fn areas(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT DISTINCT area FROM doctors
            WHERE area IS NOT NULL AND btrim(area) <> ''
            ORDER BY area
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list areas: {}", e)))
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Health check failed: {}", e)))?;

        Ok(one == 1)
    }
}

fn row_to_doctor(row: &PgRow) -> Result<DoctorRecord, DomainError> {
    let map = |e: sqlx::Error| DomainError::storage(format!("Failed to read doctor row: {}", e));

    Ok(DoctorRecord {
        id: row.try_get("id").map_err(map)?,
        name: row.try_get("name").map_err(map)?,
        email: row.try_get("email").map_err(map)?,
        password_hash: row.try_get("password_hash").map_err(map)?,
        specialization: row.try_get("specialization").map_err(map)?,
        hospital_name: row.try_get("hospital_name").map_err(map)?,
        city: row.try_get("city").map_err(map)?,
        area: row.try_get("area").map_err(map)?,
        experience: row.try_get("experience").map_err(map)?,
        latitude: row.try_get("latitude").map_err(map)?,
        longitude: row.try_get("longitude").map_err(map)?,
        created_at: row.try_get("created_at").map_err(map)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_without_filters() {
        let filter = DoctorSearchFilter::new();
        let query = search_query(&filter);
        assert!(query.sql().ends_with("WHERE 1=1 ORDER BY id"));
    }

    #[test]
    fn test_search_query_binds_each_filter() {
        let filter = DoctorSearchFilter::new()
            .with_specialization("cardio")
            .with_location("pune")
            .with_min_experience(5);
        let query = search_query(&filter);
        let sql = query.sql();

        assert!(sql.contains("lower(specialization)"));
        assert!(sql.contains("coalesce(hospital_name, '')"));
        assert!(sql.contains("coalesce(area, '')"));
        assert!(sql.contains("experience >= $5"));
    }
}
