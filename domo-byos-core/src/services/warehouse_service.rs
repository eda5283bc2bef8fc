//! Warehouse discovery and assignment

use std::collections::BTreeSet;
use std::sync::Arc;

use domo_byos_client::{
    Activity, IntegrationRef, WarehouseAssignment, WarehouseDescriptor, warehouses_path,
};

use crate::error::{CoreError, CoreResult};
use crate::reporter::ProvisionEvent;

use super::ServiceContext;

/// First listed warehouse whose name equals `name` exactly.
pub fn select_warehouse<'a>(
    warehouses: &'a [WarehouseDescriptor],
    name: &str,
) -> Option<&'a WarehouseDescriptor> {
    let mut matches = warehouses.iter().filter(|w| w.name() == Some(name));
    let first = matches.next()?;
    let duplicates = matches.count();
    if duplicates > 0 {
        log::debug!("Warehouse '{name}' is listed {} times, using the first", duplicates + 1);
    }
    Some(first)
}

pub struct WarehouseService {
    ctx: Arc<ServiceContext>,
}

impl WarehouseService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Lists the warehouses the integration can reach.
    pub async fn list_warehouses(
        &self,
        integration: &IntegrationRef,
    ) -> CoreResult<Vec<WarehouseDescriptor>> {
        self.ctx.report(ProvisionEvent::Info(format!(
            "Fetching available warehouses for BYOS integration '{integration}'..."
        )));
        self.ctx.report(ProvisionEvent::Request {
            method: "GET",
            url: self.ctx.url(&warehouses_path(&integration.id)),
            payload: None,
        });

        match self.ctx.api.list_warehouses(integration).await {
            Ok(reply) => {
                self.ctx.report(ProvisionEvent::Status(reply.status));
                self.ctx.report(ProvisionEvent::Info(format!(
                    "Found {} available warehouses",
                    reply.value.len()
                )));
                Ok(reply.value)
            }
            Err(e) => {
                self.ctx.report_client_error("Failed to fetch warehouses", &e);
                Err(e.into())
            }
        }
    }

    /// Lists warehouses, picks `warehouse_name` and assigns it.
    ///
    /// With no match nothing is written and the error carries every listed
    /// name. `activities` defaults to the configured set.
    pub async fn assign_warehouse(
        &self,
        integration: &IntegrationRef,
        warehouse_name: &str,
        activities: Option<&BTreeSet<Activity>>,
    ) -> CoreResult<WarehouseAssignment> {
        let warehouses = self.list_warehouses(integration).await?;

        let Some(descriptor) = select_warehouse(&warehouses, warehouse_name) else {
            let available: Vec<String> = warehouses
                .iter()
                .filter_map(|w| w.name().map(str::to_string))
                .collect();
            self.ctx.report(ProvisionEvent::Failure(format!(
                "Warehouse '{warehouse_name}' not found in available warehouses"
            )));
            self.ctx.report(ProvisionEvent::Listing {
                heading: "Available warehouses:".to_string(),
                items: available.clone(),
            });
            log::warn!("Warehouse '{warehouse_name}' not found among {} warehouses", available.len());
            return Err(CoreError::WarehouseNotFound {
                warehouse: warehouse_name.to_string(),
                available,
            });
        };

        self.ctx.report(ProvisionEvent::Info(format!(
            "Found matching warehouse: {warehouse_name}\n  Device: {}\n  Size: {}",
            descriptor.device_label(),
            descriptor.size_label()
        )));

        let activities = activities.unwrap_or(&self.ctx.config.warehouse_activities);
        let assignment = WarehouseAssignment::from_descriptor(descriptor, activities);
        let payload = [assignment];

        self.ctx.report(ProvisionEvent::Request {
            method: "PUT",
            url: self.ctx.url(&warehouses_path(&integration.id)),
            payload: Some(
                serde_json::to_string_pretty(&payload)
                    .unwrap_or_else(|e| format!("<unserializable: {e}>")),
            ),
        });

        match self.ctx.api.assign_warehouses(integration, &payload).await {
            Ok(reply) => {
                self.ctx.report_success(
                    reply.status,
                    "Success! Warehouse assigned to integration.",
                    &reply.body,
                );
                log::info!("Assigned warehouse '{warehouse_name}' to integration {integration}");
                let [assignment] = payload;
                Ok(assignment)
            }
            Err(e) => {
                self.ctx
                    .report_client_error("Failed to assign warehouse", &e);
                Err(e.into())
            }
        }
    }
}
