//! Domain layer - core business entities and logic.
//!
//! Pure types and functions: the visibility scope, the pipeline model,
//! derived totals and the task/comment mutation policies live here,
//! independent of persistence and transport.

pub mod comment;
pub mod counterparty;
pub mod funnel;
pub mod manager;
pub mod password;
pub mod product;
pub mod project;
pub mod sale;
pub mod scope;
pub mod service_item;
pub mod subproject;
pub mod task;

pub use comment::{Attachment, Comment, CreateComment};
pub use counterparty::{Counterparty, CounterpartyKind, CreateCounterparty, UpdateCounterparty};
pub use funnel::{append_order, Funnel, FunnelStage};
pub use manager::{Actor, CreateManager, Manager, ManagerResponse, Role, UpdateManager};
pub use password::Password;
pub use product::{CreateProduct, Product, StockRow, Unit, UpdateProduct, Warehouse};
pub use project::{
    next_service_quantity, project_cost, CreateProject, Project, ProjectServiceLine, UpdateProject,
};
pub use sale::{sale_total, CreateSale, Sale, SaleProductLine, SaleServiceLine, UpdateSale};
pub use scope::Scope;
pub use service_item::{CreateServiceItem, ServiceItem, UpdateServiceItem};
pub use subproject::{CreateSubProject, SubProject, SubProjectStatus, UpdateSubProject};
pub use task::{CreateTask, Task, UpdateTask};
