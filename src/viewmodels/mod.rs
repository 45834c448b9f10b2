// ViewModels: proyecciones puras (sin DOM ni red) y los ViewModels que
// orquestan cada flujo sobre AppState

pub mod countdown;
pub mod lifecycle;
pub mod permissions;
pub mod board;
pub mod aggregation;
pub mod bi;

pub mod loaders;
pub mod session_viewmodel;
pub mod demanda_viewmodel;
pub mod funcionarios_viewmodel;
pub mod reports_viewmodel;
pub mod navigation;

pub use session_viewmodel::SessionViewModel;
pub use demanda_viewmodel::{DemandaViewModel, NovaDemandaForm};
pub use funcionarios_viewmodel::{FuncionariosViewModel, NovoFuncionarioForm};
pub use reports_viewmodel::ReportsViewModel;
pub use navigation::NavigationViewModel;
