//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, catalog_handler, comment_handler, counterparty_handler, funnel_handler,
    manager_handler, product_handler, project_handler, sale_handler, subproject_handler,
    task_handler, upload_handler,
};
use crate::domain::{
    Attachment, Comment, Counterparty, CounterpartyKind, Funnel, FunnelStage, ManagerResponse,
    Product, Project, ProjectServiceLine, Role, Sale, SaleProductLine, SaleServiceLine,
    ServiceItem, StockRow, SubProject, SubProjectStatus, Task, Unit, Warehouse,
};
use crate::infra::StoredFile;
use crate::services::{FunnelWithStages, LoginResponse};

/// OpenAPI documentation for the CRM backend
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CRM Backend",
        version = "0.1.0",
        description = "CRM backend with scoped visibility, sales pipeline and task tracking"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        auth_handler::me,
        // Manager endpoints
        manager_handler::list_managers,
        manager_handler::get_manager,
        manager_handler::create_manager,
        manager_handler::update_manager,
        manager_handler::delete_manager,
        // Counterparty endpoints
        counterparty_handler::list_counterparties,
        counterparty_handler::get_counterparty,
        counterparty_handler::create_counterparty,
        counterparty_handler::update_counterparty,
        counterparty_handler::delete_counterparty,
        // Product endpoints
        product_handler::list_products,
        product_handler::get_product,
        product_handler::create_product,
        product_handler::update_product,
        product_handler::delete_product,
        product_handler::get_stock,
        product_handler::replace_stock,
        // Dictionary endpoints
        catalog_handler::list_services,
        catalog_handler::get_service,
        catalog_handler::create_service,
        catalog_handler::update_service,
        catalog_handler::delete_service,
        catalog_handler::list_units,
        catalog_handler::get_unit,
        catalog_handler::create_unit,
        catalog_handler::update_unit,
        catalog_handler::delete_unit,
        catalog_handler::list_warehouses,
        catalog_handler::get_warehouse,
        catalog_handler::create_warehouse,
        catalog_handler::update_warehouse,
        catalog_handler::delete_warehouse,
        catalog_handler::list_statuses,
        catalog_handler::create_status,
        catalog_handler::update_status,
        catalog_handler::delete_status,
        // Sale endpoints
        sale_handler::list_sales,
        sale_handler::get_sale,
        sale_handler::create_sale,
        sale_handler::update_sale,
        sale_handler::delete_sale,
        // Project endpoints
        project_handler::list_projects,
        project_handler::get_project,
        project_handler::create_project,
        project_handler::update_project,
        project_handler::delete_project,
        project_handler::set_stage,
        project_handler::add_service,
        project_handler::remove_service,
        project_handler::project_cost,
        // Sub-project endpoints
        subproject_handler::list_subprojects,
        subproject_handler::get_subproject,
        subproject_handler::create_subproject,
        subproject_handler::update_subproject,
        subproject_handler::set_subproject_status,
        subproject_handler::delete_subproject,
        // Task endpoints
        task_handler::list_tasks,
        task_handler::get_task,
        task_handler::create_task,
        task_handler::update_task,
        task_handler::set_task_status,
        task_handler::delete_task,
        // Funnel endpoints
        funnel_handler::list_funnels,
        funnel_handler::get_funnel,
        funnel_handler::create_funnel,
        funnel_handler::update_funnel,
        funnel_handler::delete_funnel,
        funnel_handler::create_stage,
        funnel_handler::update_stage,
        funnel_handler::delete_stage,
        // Comment endpoints
        comment_handler::list_project_comments,
        comment_handler::create_project_comment,
        comment_handler::update_project_comment,
        comment_handler::delete_project_comment,
        comment_handler::list_subproject_comments,
        comment_handler::create_subproject_comment,
        comment_handler::update_subproject_comment,
        comment_handler::delete_subproject_comment,
        // Upload endpoints
        upload_handler::upload_file,
        upload_handler::delete_file,
    ),
    components(
        schemas(
            // Domain types
            Role,
            ManagerResponse,
            Counterparty,
            CounterpartyKind,
            Unit,
            Warehouse,
            Product,
            StockRow,
            ServiceItem,
            SubProjectStatus,
            Sale,
            SaleProductLine,
            SaleServiceLine,
            Project,
            ProjectServiceLine,
            SubProject,
            Task,
            Funnel,
            FunnelStage,
            Comment,
            Attachment,
            StoredFile,
            // Service types
            LoginResponse,
            FunnelWithStages,
            // Request types
            auth_handler::LoginRequest,
            manager_handler::CreateManagerRequest,
            manager_handler::UpdateManagerRequest,
            counterparty_handler::CreateCounterpartyRequest,
            counterparty_handler::UpdateCounterpartyRequest,
            product_handler::CreateProductRequest,
            product_handler::UpdateProductRequest,
            product_handler::ReplaceStockRequest,
            product_handler::StockRowRequest,
            catalog_handler::CreateServiceRequest,
            catalog_handler::UpdateServiceRequest,
            catalog_handler::CreateUnitRequest,
            catalog_handler::UpdateUnitRequest,
            catalog_handler::WarehouseRequest,
            catalog_handler::SubProjectStatusRequest,
            sale_handler::SaleProductRequest,
            sale_handler::CreateSaleRequest,
            sale_handler::UpdateSaleRequest,
            project_handler::CreateProjectRequest,
            project_handler::UpdateProjectRequest,
            project_handler::SetStageRequest,
            project_handler::AddServiceRequest,
            project_handler::ProjectCostResponse,
            subproject_handler::CreateSubProjectRequest,
            subproject_handler::UpdateSubProjectRequest,
            subproject_handler::SetSubProjectStatusRequest,
            task_handler::CreateTaskRequest,
            task_handler::UpdateTaskRequest,
            task_handler::SetTaskStatusRequest,
            funnel_handler::FunnelRequest,
            funnel_handler::CreateStageRequest,
            funnel_handler::UpdateStageRequest,
            comment_handler::AttachmentRequest,
            comment_handler::CreateCommentRequest,
            comment_handler::UpdateCommentRequest,
            upload_handler::DeleteUploadRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Manager login and identity"),
        (name = "Managers", description = "Manager account administration"),
        (name = "Counterparties", description = "Client and partner records"),
        (name = "Products", description = "Goods catalog and stock"),
        (name = "Catalog", description = "Dictionaries: services, units, warehouses, statuses"),
        (name = "Sales", description = "Sales with derived totals"),
        (name = "Projects", description = "Projects and the sales pipeline"),
        (name = "SubProjects", description = "Sub-projects and their Kanban"),
        (name = "Tasks", description = "Task tracking"),
        (name = "Funnels", description = "Pipeline structure"),
        (name = "Comments", description = "Comments on projects and sub-projects"),
        (name = "Uploads", description = "Attachment files")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
