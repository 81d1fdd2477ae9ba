use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::sync::RwLock;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ListResourceTemplatesResult, ListResourcesResult,
        PaginatedRequestParams, ProtocolVersion, RawResource, RawResourceTemplate,
        ReadResourceRequestParams, ReadResourceResult, Resource, ResourceContents,
        ResourceTemplate, ServerCapabilities, ServerInfo,
    },
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::domain::date_window::{DateWindow, parse_date};
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::room::RoomCategory;
use crate::error::{HotelError, Result as HotelResult};
use crate::service::BookingService;

const OVERVIEW_URI: &str = "hotel://pricing/overview";

// ---------- Resource Store ----------

/// Reports and pricing summaries produced by tools, exposed as MCP resources.
/// Keys are URIs like `hotel://report/occupancy/2024-06-01/2024-06-30`.
#[derive(Clone, Default)]
pub struct ResourceStore {
    entries: Arc<RwLock<BTreeMap<String, ResourceEntry>>>,
}

#[derive(Clone)]
struct ResourceEntry {
    name: String,
    text: String,
}

impl ResourceStore {
    async fn insert(&self, uri: impl Into<String>, name: impl Into<String>, text: String) {
        self.entries.write().await.insert(
            uri.into(),
            ResourceEntry {
                name: name.into(),
                text,
            },
        );
    }

    async fn get(&self, uri: &str) -> Option<ResourceEntry> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn list(&self) -> Vec<(String, String)> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(uri, entry)| (uri.clone(), entry.name.clone()))
            .collect()
    }
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore").finish()
    }
}

fn report_uri(kind: &str, window: &DateWindow) -> String {
    format!("hotel://report/{kind}/{}/{}", window.start, window.end)
}

// ---------- Tool parameter types ----------

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct QuoteToolParams {
    /// Room category: SINGLE, DOUBLE or SUITE
    pub category: String,
    /// Check-in date (YYYY-MM-DD), first night of the stay
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD), not charged
    pub check_out: String,
    /// Occupancy rate between 0 and 1. Omit to use the current occupancy over the stay.
    pub occupancy_rate: Option<f64>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct BasePriceToolParams {
    /// Room category: SINGLE, DOUBLE or SUITE
    pub category: String,
    /// New nightly base price (must be >= 0)
    pub price: f64,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SeasonalPricingToolParams {
    /// First day of the season (YYYY-MM-DD, inclusive)
    pub start: String,
    /// Last day of the season (YYYY-MM-DD, inclusive)
    pub end: String,
    /// Price multiplier for every day in the range (must be > 0)
    pub multiplier: f64,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct EventPricingToolParams {
    /// Event date (YYYY-MM-DD)
    pub date: String,
    /// Event name (e.g. "NewYear", "Marathon")
    pub name: String,
    /// Price multiplier while the event runs (must be > 0)
    pub multiplier: f64,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct BookToolParams {
    /// Customer ID
    pub customer_id: u32,
    /// Room ID to book
    pub room_id: u32,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD), must be after check-in
    pub check_out: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ReservationIdToolParams {
    /// Reservation ID
    pub reservation_id: u32,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RescheduleToolParams {
    /// Reservation ID
    pub reservation_id: u32,
    /// New check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// New check-out date (YYYY-MM-DD)
    pub check_out: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ReservationQueryToolParams {
    /// Only reservations of this customer
    pub customer_id: Option<u32>,
    /// Only reservations of this room
    pub room_id: Option<u32>,
    /// Only reservations with this status: CONFIRMED or CANCELLED
    pub status: Option<String>,
    /// Window start (YYYY-MM-DD). With `end`, keeps reservations wholly inside the window.
    pub start: Option<String>,
    /// Window end (YYYY-MM-DD, inclusive)
    pub end: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DateRangeToolParams {
    /// Window start (YYYY-MM-DD, inclusive)
    pub start: String,
    /// Window end (YYYY-MM-DD, inclusive)
    pub end: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CancellationReportToolParams {
    /// Window start (YYYY-MM-DD). Omit both dates for the configured lookback period ending today.
    pub start: Option<String>,
    /// Window end (YYYY-MM-DD, inclusive)
    pub end: Option<String>,
}

fn success(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

fn failure(text: String) -> CallToolResult {
    CallToolResult::error(vec![Content::text(text)])
}

fn optional_window(start: Option<&str>, end: Option<&str>) -> HotelResult<Option<DateWindow>> {
    match (start, end) {
        (Some(start), Some(end)) => DateWindow::parse(start, end).map(Some),
        (None, None) => Ok(None),
        _ => Err(HotelError::validation(
            "start and end must be given together",
        )),
    }
}

fn format_reservations(reservations: &[Reservation]) -> String {
    if reservations.is_empty() {
        return "No reservations found.\n".into();
    }
    let mut text = String::new();
    let _ = writeln!(text, "Found {} reservations:\n", reservations.len());
    for reservation in reservations {
        let _ = writeln!(text, "- {reservation}");
    }
    text
}

#[derive(Clone)]
pub struct HotelMcpServer {
    service: Arc<BookingService>,
    tool_router: ToolRouter<Self>,
    resources: ResourceStore,
}

#[tool_router]
impl HotelMcpServer {
    pub fn new(service: Arc<BookingService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
            resources: ResourceStore::default(),
        }
    }

    async fn store_report(&self, kind: &str, title: &str, window: &DateWindow, text: &str) {
        let uri = report_uri(kind, window);
        let name = format!("{title}: {window}");
        self.resources.insert(uri, name, text.to_string()).await;
    }

    // ---------- Pricing ----------

    /// Quote a stay with its per-night breakdown.
    #[tool(
        name = "hotel_quote_stay",
        description = "Price a stay for a room category, night by night. Combines base price, weekend surcharge (x1.5 on Saturday and Sunday), seasonal and event multipliers, and the occupancy discount (20% below 30% occupancy, 10% below 50%). The check-out night is not charged.",
        annotations(read_only_hint = true)
    )]
    async fn hotel_quote_stay(
        &self,
        Parameters(params): Parameters<QuoteToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let category: RoomCategory = params.category.parse()?;
            let check_in = parse_date("check_in", &params.check_in)?;
            let check_out = parse_date("check_out", &params.check_out)?;
            self.service
                .quote_stay(category, check_in, check_out, params.occupancy_rate)
                .await
        }
        .await;

        match outcome {
            Ok(quote) => Ok(success(quote.to_string())),
            Err(e @ HotelError::InvalidRange { .. }) => Ok(failure(format!(
                "Failed to quote stay: {e}. Check-out must be after check-in."
            ))),
            Err(e) => Ok(failure(format!("Failed to quote stay: {e}"))),
        }
    }

    /// Show base prices, seasonal ranges and event multipliers.
    #[tool(
        name = "hotel_pricing_overview",
        description = "Show the current pricing rules: base price per room category, seasonal multipliers grouped into date ranges, and event multipliers by date.",
        annotations(read_only_hint = true)
    )]
    async fn hotel_pricing_overview(&self) -> Result<CallToolResult, McpError> {
        match self.service.pricing().snapshot() {
            Ok(tables) => {
                let text = tables.overview().to_string();
                self.resources
                    .insert(OVERVIEW_URI, "Pricing overview", text.clone())
                    .await;
                Ok(success(text))
            }
            Err(e) => Ok(failure(format!("Failed to read pricing rules: {e}"))),
        }
    }

    #[tool(
        name = "hotel_update_base_price",
        description = "Set the nightly base price for a room category (SINGLE, DOUBLE or SUITE). The price must be zero or positive."
    )]
    async fn hotel_update_base_price(
        &self,
        Parameters(params): Parameters<BasePriceToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = params
            .category
            .parse::<RoomCategory>()
            .and_then(|category| {
                self.service
                    .pricing()
                    .update_base_price(category, params.price)
                    .map(|()| category)
            });
        match outcome {
            Ok(category) => Ok(success(format!(
                "Base price for {category} rooms set to ${:.2}",
                params.price
            ))),
            Err(e) => Ok(failure(format!("Failed to update base price: {e}"))),
        }
    }

    #[tool(
        name = "hotel_set_seasonal_pricing",
        description = "Apply a seasonal multiplier to every day from start to end (both inclusive). Overlapping days take the most recent value."
    )]
    async fn hotel_set_seasonal_pricing(
        &self,
        Parameters(params): Parameters<SeasonalPricingToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = DateWindow::parse(&params.start, &params.end).and_then(|window| {
            self.service
                .pricing()
                .set_seasonal_multiplier(window.start, window.end, params.multiplier)
                .map(|()| window)
        });
        match outcome {
            Ok(window) => Ok(success(format!(
                "Seasonal multiplier x{} applied to {window}",
                params.multiplier
            ))),
            Err(e) => Ok(failure(format!("Failed to set seasonal pricing: {e}"))),
        }
    }

    #[tool(
        name = "hotel_set_event_pricing",
        description = "Add or replace a named event multiplier on a date. Several events may share a date; the highest multiplier applies."
    )]
    async fn hotel_set_event_pricing(
        &self,
        Parameters(params): Parameters<EventPricingToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = parse_date("event", &params.date).and_then(|date| {
            self.service
                .pricing()
                .set_event_pricing(date, &params.name, params.multiplier)
                .map(|()| date)
        });
        match outcome {
            Ok(date) => Ok(success(format!(
                "Event '{}' on {date} priced at x{}",
                params.name.trim(),
                params.multiplier
            ))),
            Err(e) => Ok(failure(format!("Failed to set event pricing: {e}"))),
        }
    }

    #[tool(
        name = "hotel_clear_seasonal_pricing",
        description = "Remove every seasonal multiplier.",
        annotations(destructive_hint = true)
    )]
    async fn hotel_clear_seasonal_pricing(&self) -> Result<CallToolResult, McpError> {
        match self.service.pricing().clear_seasonal_pricing() {
            Ok(()) => Ok(success("Seasonal pricing cleared.".into())),
            Err(e) => Ok(failure(format!("Failed to clear seasonal pricing: {e}"))),
        }
    }

    #[tool(
        name = "hotel_clear_event_pricing",
        description = "Remove every event multiplier.",
        annotations(destructive_hint = true)
    )]
    async fn hotel_clear_event_pricing(&self) -> Result<CallToolResult, McpError> {
        match self.service.pricing().clear_event_pricing() {
            Ok(()) => Ok(success("Event pricing cleared.".into())),
            Err(e) => Ok(failure(format!("Failed to clear event pricing: {e}"))),
        }
    }

    // ---------- Reservations ----------

    #[tool(
        name = "hotel_book",
        description = "Book a room for a customer. The stay is priced at the current occupancy over its nights and stored as CONFIRMED. Fails if the room is unknown, unavailable or already booked on those nights."
    )]
    async fn hotel_book(
        &self,
        Parameters(params): Parameters<BookToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let check_in = parse_date("check_in", &params.check_in)?;
            let check_out = parse_date("check_out", &params.check_out)?;
            self.service
                .create_reservation(params.customer_id, params.room_id, check_in, check_out)
                .await
        }
        .await;

        match outcome {
            Ok(reservation) => Ok(success(format!("Booked: {reservation}"))),
            Err(e) => Ok(failure(format!(
                "Booking failed for room {}: {e}",
                params.room_id
            ))),
        }
    }

    #[tool(
        name = "hotel_cancel",
        description = "Cancel a reservation. Cancelling an already cancelled reservation has no effect; the stored price is kept."
    )]
    async fn hotel_cancel(
        &self,
        Parameters(params): Parameters<ReservationIdToolParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.service.cancel_reservation(params.reservation_id).await {
            Ok(reservation) => Ok(success(format!("Cancelled: {reservation}"))),
            Err(e) => Ok(failure(format!(
                "Failed to cancel reservation {}: {e}",
                params.reservation_id
            ))),
        }
    }

    #[tool(
        name = "hotel_reschedule",
        description = "Move a confirmed reservation to new dates and re-price it under the current rules."
    )]
    async fn hotel_reschedule(
        &self,
        Parameters(params): Parameters<RescheduleToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let check_in = parse_date("check_in", &params.check_in)?;
            let check_out = parse_date("check_out", &params.check_out)?;
            self.service
                .reschedule_reservation(params.reservation_id, check_in, check_out)
                .await
        }
        .await;

        match outcome {
            Ok(reservation) => Ok(success(format!("Rescheduled: {reservation}"))),
            Err(e) => Ok(failure(format!(
                "Failed to reschedule reservation {}: {e}",
                params.reservation_id
            ))),
        }
    }

    /// List reservations, optionally filtered. Filters combine with AND.
    #[tool(
        name = "hotel_reservations",
        description = "List reservations, optionally filtered by customer, room, status (CONFIRMED or CANCELLED) and a start/end window that keeps only reservations lying wholly inside it.",
        annotations(read_only_hint = true)
    )]
    async fn hotel_reservations(
        &self,
        Parameters(params): Parameters<ReservationQueryToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let status = params
                .status
                .as_deref()
                .map(str::parse::<ReservationStatus>)
                .transpose()?;
            let window = optional_window(params.start.as_deref(), params.end.as_deref())?;
            let mut found = match window {
                Some(window) => self.service.reservations_within(&window).await?,
                None => self.service.reservations().await?,
            };
            found.retain(|r| {
                params.customer_id.is_none_or(|id| r.customer_id == id)
                    && params.room_id.is_none_or(|id| r.room_id == id)
                    && status.is_none_or(|s| r.status == s)
            });
            Ok::<_, HotelError>(found)
        }
        .await;

        match outcome {
            Ok(found) => Ok(success(format_reservations(&found))),
            Err(e) => Ok(failure(format!("Failed to list reservations: {e}"))),
        }
    }

    // ---------- Reports ----------

    #[tool(
        name = "hotel_occupancy_report",
        description = "Occupancy over an inclusive date window: occupied room-days from CONFIRMED reservations clipped to the window, overall and per room category.",
        annotations(read_only_hint = true)
    )]
    async fn hotel_occupancy_report(
        &self,
        Parameters(params): Parameters<DateRangeToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let window = DateWindow::parse(&params.start, &params.end)?;
            let report = self.service.occupancy_report(&window).await?;
            Ok::<_, HotelError>((window, report.to_string()))
        }
        .await;

        match outcome {
            Ok((window, text)) => {
                self.store_report("occupancy", "Occupancy report", &window, &text)
                    .await;
                Ok(success(text))
            }
            Err(e) => Ok(failure(format!("Failed to build occupancy report: {e}"))),
        }
    }

    #[tool(
        name = "hotel_revenue_report",
        description = "Revenue over an inclusive date window, re-priced night by night from the current pricing rules, overall and per room category.",
        annotations(read_only_hint = true)
    )]
    async fn hotel_revenue_report(
        &self,
        Parameters(params): Parameters<DateRangeToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let window = DateWindow::parse(&params.start, &params.end)?;
            let report = self.service.revenue_report(&window).await?;
            Ok::<_, HotelError>((window, report.to_string()))
        }
        .await;

        match outcome {
            Ok((window, text)) => {
                self.store_report("revenue", "Revenue report", &window, &text)
                    .await;
                Ok(success(text))
            }
            Err(e) => Ok(failure(format!("Failed to build revenue report: {e}"))),
        }
    }

    #[tool(
        name = "hotel_cancellation_report",
        description = "Cancelled reservations touching a date window, overall and per room category. Without dates, covers the configured lookback period ending today.",
        annotations(read_only_hint = true)
    )]
    async fn hotel_cancellation_report(
        &self,
        Parameters(params): Parameters<CancellationReportToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let window = optional_window(params.start.as_deref(), params.end.as_deref())?;
            let today = chrono::Local::now().date_naive();
            self.service.cancellation_report(window, today).await
        }
        .await;

        match outcome {
            Ok(report) => {
                let text = report.to_string();
                self.store_report("cancellations", "Cancellation report", &report.window, &text)
                    .await;
                Ok(success(text))
            }
            Err(e) => Ok(failure(format!(
                "Failed to build cancellation report: {e}"
            ))),
        }
    }

    #[tool(
        name = "hotel_room_type_report",
        description = "Occupancy and revenue side by side for each room category over an inclusive date window.",
        annotations(read_only_hint = true)
    )]
    async fn hotel_room_type_report(
        &self,
        Parameters(params): Parameters<DateRangeToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let window = DateWindow::parse(&params.start, &params.end)?;
            let report = self.service.room_type_performance_report(&window).await?;
            Ok::<_, HotelError>((window, report.to_string()))
        }
        .await;

        match outcome {
            Ok((window, text)) => {
                self.store_report("room-types", "Room type performance", &window, &text)
                    .await;
                Ok(success(text))
            }
            Err(e) => Ok(failure(format!(
                "Failed to build room type report: {e}"
            ))),
        }
    }

    #[tool(
        name = "hotel_custom_range_report",
        description = "Occupancy rate, revenue and cancellation count for any inclusive date window in one summary.",
        annotations(read_only_hint = true)
    )]
    async fn hotel_custom_range_report(
        &self,
        Parameters(params): Parameters<DateRangeToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let window = DateWindow::parse(&params.start, &params.end)?;
            let report = self.service.custom_range_report(&window).await?;
            Ok::<_, HotelError>((window, report.to_string()))
        }
        .await;

        match outcome {
            Ok((window, text)) => {
                self.store_report("custom", "Custom range report", &window, &text)
                    .await;
                Ok(success(text))
            }
            Err(e) => Ok(failure(format!(
                "Failed to build custom range report: {e}"
            ))),
        }
    }
}

#[tool_handler]
impl ServerHandler for HotelMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Hotel pricing MCP server: prices room-nights and reports occupancy, revenue and cancellations.\n\
                 \n\
                 ## Pricing\n\
                 - hotel_quote_stay: per-night breakdown and total for a stay\n\
                 - hotel_pricing_overview: base prices, seasonal ranges, event multipliers\n\
                 - hotel_update_base_price: set a category's nightly base price\n\
                 - hotel_set_seasonal_pricing: multiplier over an inclusive date range\n\
                 - hotel_set_event_pricing: named event multiplier on one date\n\
                 - hotel_clear_seasonal_pricing / hotel_clear_event_pricing: drop those rules\n\
                 \n\
                 ## Reservations\n\
                 - hotel_book: book a room; the stay is priced at booking time\n\
                 - hotel_cancel: cancel a reservation (idempotent)\n\
                 - hotel_reschedule: move a reservation and re-price it\n\
                 - hotel_reservations: list reservations with optional filters\n\
                 \n\
                 ## Reports\n\
                 All windows are inclusive on both ends and only count the part of each reservation \
                 that falls inside them.\n\
                 - hotel_occupancy_report\n\
                 - hotel_revenue_report\n\
                 - hotel_cancellation_report\n\
                 - hotel_room_type_report\n\
                 - hotel_custom_range_report\n\
                 \n\
                 ## Resources\n\
                 Generated reports and the latest pricing overview are kept as MCP resources."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let entries = self.resources.list().await;
        let resources: Vec<Resource> = entries
            .into_iter()
            .map(|(uri, name)| Resource {
                annotations: None,
                raw: RawResource {
                    uri,
                    name,
                    title: None,
                    description: None,
                    mime_type: Some("text/plain".into()),
                    size: None,
                    icons: None,
                    meta: None,
                },
            })
            .collect();
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let templates = vec![
            ResourceTemplate {
                annotations: None,
                raw: RawResourceTemplate {
                    uri_template: "hotel://report/{kind}/{start}/{end}".into(),
                    name: "Hotel Report".into(),
                    title: Some("Generated report".into()),
                    description: Some(
                        "Report text for a window; kind is occupancy, revenue, cancellations, room-types or custom".into(),
                    ),
                    mime_type: Some("text/plain".into()),
                    icons: None,
                },
            },
            ResourceTemplate {
                annotations: None,
                raw: RawResourceTemplate {
                    uri_template: OVERVIEW_URI.into(),
                    name: "Pricing Overview".into(),
                    title: Some("Pricing rules".into()),
                    description: Some(
                        "Latest pricing overview (fetched via hotel_pricing_overview)".into(),
                    ),
                    mime_type: Some("text/plain".into()),
                    icons: None,
                },
            },
        ];
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match self.resources.get(&request.uri).await {
            Some(entry) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(entry.text, request.uri)],
            }),
            None => Err(McpError::resource_not_found(
                format!("resource not found: {}", request.uri),
                None,
            )),
        }
    }
}
