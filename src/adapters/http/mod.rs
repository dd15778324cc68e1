//! Data-access client - reqwest implementation of all three ports.
//!
//! Talks to the planning portal's backend REST API with bearer-token
//! auth. Wire payloads are camelCase and carry months as "YYYY-MM"
//! labels; the DTOs at the bottom of this file translate to and from the
//! domain types.
//!
//! # Configuration
//!
//! ```ignore
//! let config = DataAccessConfig::new("https://portal.example.com", api_token)
//!     .with_timeout(Duration::from_secs(10))
//!     .with_page_size(100);
//!
//! let client = DataAccessClient::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{
    CatalogEntry, CatalogFilter, CatalogKind, Customer, Product,
};
use crate::domain::cycle::{Cycle, CycleStatus};
use crate::domain::forecast::{ForecastRecord, MonthEntry, Pricing, RecordStatus};
use crate::domain::foundation::{
    CustomerId, CycleId, DomainError, ErrorCode, ForecastId, PlanningMonth, ProductId, SalesRepId,
};
use crate::ports::{
    BatchWriteReport, CatalogPage, CatalogSource, CycleStore, ForecastStore, RowFailure,
};

/// Configuration for the data-access client.
#[derive(Debug, Clone)]
pub struct DataAccessConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Bearer token for authentication.
    api_token: Secret<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Page size used for catalog listings.
    pub page_size: u32,
}

impl DataAccessConfig {
    /// Creates a configuration with the given base URL and token.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: Secret::new(api_token.into()),
            timeout: Duration::from_secs(30),
            page_size: 50,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the catalog page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    fn api_token(&self) -> &str {
        self.api_token.expose_secret()
    }
}

/// HTTP implementation of [`CatalogSource`], [`ForecastStore`], and
/// [`CycleStore`].
pub struct DataAccessClient {
    config: DataAccessConfig,
    client: Client,
}

impl DataAccessClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: DataAccessConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<Response, DomainError> {
        self.client
            .get(self.url(path))
            .bearer_auth(self.config.api_token())
            .send()
            .await
            .map_err(transport_error)
    }

    async fn get_with_query<Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response, DomainError> {
        self.client
            .get(self.url(path))
            .bearer_auth(self.config.api_token())
            .query(query)
            .send()
            .await
            .map_err(transport_error)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, DomainError> {
        self.client
            .post(self.url(path))
            .bearer_auth(self.config.api_token())
            .json(body)
            .send()
            .await
            .map_err(transport_error)
    }

    async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, DomainError> {
        self.client
            .put(self.url(path))
            .bearer_auth(self.config.api_token())
            .json(body)
            .send()
            .await
            .map_err(transport_error)
    }

    async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, DomainError> {
        response.json::<T>().await.map_err(|e| {
            DomainError::new(ErrorCode::ApiError, format!("Failed to decode response: {}", e))
        })
    }

    /// Reads the body of a failed response into an error of `code`.
    async fn reject(response: Response, code: ErrorCode) -> DomainError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        DomainError::new(code, format!("Backend returned {}", status))
            .with_detail("status", status.as_u16().to_string())
            .with_detail("body", body)
    }
}

fn transport_error(e: reqwest::Error) -> DomainError {
    let kind = if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect"
    } else {
        "transport"
    };
    DomainError::new(ErrorCode::ApiError, format!("Request failed: {}", e))
        .with_detail("kind", kind)
}

#[async_trait]
impl CatalogSource for DataAccessClient {
    async fn list(
        &self,
        kind: CatalogKind,
        filter: &CatalogFilter,
        page: u32,
        page_size: u32,
    ) -> Result<CatalogPage, DomainError> {
        let query = CatalogQueryDto {
            page,
            page_size,
            active_only: filter.active_only,
            customer_id: filter.customer_id,
            search: filter.search.clone(),
        };
        let path = format!("/api/catalog/{}", kind.as_str());
        let response = self.get_with_query(&path, &query).await?;

        if !response.status().is_success() {
            return Err(Self::reject(response, ErrorCode::ApiError).await);
        }

        match kind {
            CatalogKind::Customers => {
                let page: CatalogPageDto<CustomerDto> = Self::decode(response).await?;
                let items = page
                    .items
                    .into_iter()
                    .map(|dto| dto.into_domain().map(CatalogEntry::Customer))
                    .collect::<Result<_, _>>()?;
                Ok(CatalogPage {
                    items,
                    has_next: page.has_next,
                })
            }
            CatalogKind::Products => {
                let page: CatalogPageDto<ProductDto> = Self::decode(response).await?;
                let items = page
                    .items
                    .into_iter()
                    .map(|dto| CatalogEntry::Product(dto.into_domain()))
                    .collect();
                Ok(CatalogPage {
                    items,
                    has_next: page.has_next,
                })
            }
        }
    }
}

#[async_trait]
impl ForecastStore for DataAccessClient {
    async fn list(
        &self,
        cycle_id: CycleId,
        customer_id: CustomerId,
    ) -> Result<Vec<ForecastRecord>, DomainError> {
        let path = format!("/api/cycles/{}/customers/{}/forecasts", cycle_id, customer_id);
        let response = self.get(&path).await?;

        if !response.status().is_success() {
            return Err(Self::reject(response, ErrorCode::ApiError).await);
        }

        let dtos: Vec<ForecastDto> = Self::decode(response).await?;
        dtos.into_iter().map(ForecastDto::into_domain).collect()
    }

    async fn create_or_update(
        &self,
        cycle_id: CycleId,
        customer_id: CustomerId,
        records: Vec<ForecastRecord>,
    ) -> Result<BatchWriteReport, DomainError> {
        let path = format!("/api/cycles/{}/customers/{}/forecasts", cycle_id, customer_id);
        let body = BatchWriteRequestDto {
            records: records.iter().map(ForecastWriteDto::from_domain).collect(),
        };
        let response = self.put(&path, &body).await?;

        if !response.status().is_success() {
            return Err(Self::reject(response, ErrorCode::PersistenceFailure).await);
        }

        let report: BatchWriteReportDto = Self::decode(response).await?;
        Ok(report.into_domain())
    }

    async fn submit(&self, id: &ForecastId) -> Result<ForecastRecord, DomainError> {
        let path = format!("/api/forecasts/{}/submit", id);
        let response = self.post(&path, &()).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(
                DomainError::new(ErrorCode::ForecastNotFound, "No forecast with this identifier")
                    .with_detail("forecast_id", id.to_string()),
            ),
            status if status.is_success() => {
                let dto: ForecastDto = Self::decode(response).await?;
                dto.into_domain()
            }
            _ => Err(Self::reject(response, ErrorCode::PersistenceFailure).await),
        }
    }
}

#[async_trait]
impl CycleStore for DataAccessClient {
    async fn active_cycle(&self) -> Result<Option<Cycle>, DomainError> {
        let response = self.get("/api/cycles/active").await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let dto: CycleDto = Self::decode(response).await?;
                dto.into_domain().map(Some)
            }
            _ => Err(Self::reject(response, ErrorCode::ApiError).await),
        }
    }

    async fn get(&self, id: CycleId) -> Result<Option<Cycle>, DomainError> {
        let response = self.get(&format!("/api/cycles/{}", id)).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let dto: CycleDto = Self::decode(response).await?;
                dto.into_domain().map(Some)
            }
            _ => Err(Self::reject(response, ErrorCode::ApiError).await),
        }
    }

    async fn change_status(
        &self,
        id: CycleId,
        status: CycleStatus,
    ) -> Result<Cycle, DomainError> {
        let path = format!("/api/cycles/{}/status", id);
        let body = ChangeStatusDto { status };
        let response = self.post(&path, &body).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(
                DomainError::new(ErrorCode::CycleNotFound, "No cycle with this identifier")
                    .with_detail("cycle_id", id.to_string()),
            ),
            s if s.is_success() => {
                let dto: CycleDto = Self::decode(response).await?;
                dto.into_domain()
            }
            _ => Err(Self::reject(response, ErrorCode::PersistenceFailure).await),
        }
    }
}

// ───────────────────────────────────────────────────────────────────────
// Wire DTOs
// ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogQueryDto {
    page: u32,
    page_size: u32,
    active_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogPageDto<T> {
    items: Vec<T>,
    has_next: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerDto {
    id: CustomerId,
    name: String,
    active: bool,
    sales_rep: String,
}

impl CustomerDto {
    fn into_domain(self) -> Result<Customer, DomainError> {
        let sales_rep = SalesRepId::new(self.sales_rep).map_err(|e| {
            DomainError::new(ErrorCode::ApiError, format!("Invalid customer payload: {}", e))
        })?;
        Ok(Customer {
            id: self.id,
            name: self.name,
            active: self.active,
            sales_rep,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDto {
    id: ProductId,
    name: String,
    active: bool,
    default_unit_price: Option<f64>,
}

impl ProductDto {
    fn into_domain(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            active: self.active,
            default_unit_price: self.default_unit_price,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycleDto {
    id: CycleId,
    name: String,
    year: i32,
    month: u32,
    status: CycleStatus,
    start_date: Option<String>,
    close_date: Option<String>,
    planning_start_month: String,
}

impl CycleDto {
    fn into_domain(self) -> Result<Cycle, DomainError> {
        let start: PlanningMonth = self.planning_start_month.parse().map_err(|e| {
            DomainError::new(ErrorCode::ApiError, format!("Invalid cycle payload: {}", e))
        })?;
        Ok(Cycle::reconstitute(
            self.id,
            self.name,
            self.year,
            self.month,
            self.status,
            self.start_date,
            self.close_date,
            start,
        ))
    }
}

#[derive(Debug, Serialize)]
struct ChangeStatusDto {
    status: CycleStatus,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthEntryDto {
    month: String,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastDto {
    id: String,
    cycle_id: CycleId,
    customer_id: CustomerId,
    product_id: ProductId,
    status: RecordStatus,
    months: Vec<MonthEntryDto>,
    #[serde(default = "default_use_customer_price")]
    use_customer_price: bool,
    #[serde(default)]
    override_price: Option<f64>,
}

fn default_use_customer_price() -> bool {
    true
}

impl ForecastDto {
    fn into_domain(self) -> Result<ForecastRecord, DomainError> {
        let invalid =
            |e: &dyn std::fmt::Display| {
                DomainError::new(ErrorCode::ApiError, format!("Invalid forecast payload: {}", e))
            };

        let id = ForecastId::new(self.id).map_err(|e| invalid(&e))?;
        let months = self
            .months
            .into_iter()
            .map(|m| {
                m.month
                    .parse::<PlanningMonth>()
                    .map(|month| MonthEntry {
                        month,
                        quantity: m.quantity,
                    })
                    .map_err(|e| invalid(&e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ForecastRecord::reconstitute(
            id,
            self.cycle_id,
            self.customer_id,
            self.product_id,
            self.status,
            months,
            Pricing {
                use_customer_price: self.use_customer_price,
                override_price: self.override_price,
            },
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastWriteDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    product_id: ProductId,
    months: Vec<MonthEntryDto>,
    use_customer_price: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    override_price: Option<f64>,
}

impl ForecastWriteDto {
    fn from_domain(record: &ForecastRecord) -> Self {
        Self {
            id: record
                .identity()
                .forecast_id()
                .map(|id| id.as_str().to_string()),
            product_id: record.product_id(),
            months: record
                .months()
                .iter()
                .map(|e| MonthEntryDto {
                    month: e.month.label(),
                    quantity: e.quantity,
                })
                .collect(),
            use_customer_price: record.pricing().use_customer_price,
            override_price: record.pricing().override_price,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchWriteRequestDto {
    records: Vec<ForecastWriteDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchWriteReportDto {
    created: u32,
    updated: u32,
    #[serde(default)]
    failures: Vec<RowFailureDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowFailureDto {
    product_id: ProductId,
    message: String,
}

impl BatchWriteReportDto {
    fn into_domain(self) -> BatchWriteReport {
        BatchWriteReport {
            created: self.created,
            updated: self.updated,
            failures: self
                .failures
                .into_iter()
                .map(|f| RowFailure {
                    product_id: f.product_id,
                    message: f.message,
                })
                .collect(),
        }
    }
}
