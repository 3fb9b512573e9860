use actix_web::web;
use std::sync::Arc;

use crate::modules::auth::application::use_cases::current_user::ICurrentUserUseCase;
use crate::modules::auth::application::use_cases::login_user::ILoginUserUseCase;
use crate::modules::auth::application::use_cases::register_user::IRegisterUserUseCase;
use crate::modules::lead::application::use_cases::create_lead::ICreateLeadUseCase;
use crate::modules::lead::application::use_cases::delete_lead::IDeleteLeadUseCase;
use crate::modules::lead::application::use_cases::get_lead::IGetLeadUseCase;
use crate::modules::lead::application::use_cases::list_leads::IListLeadsUseCase;
use crate::modules::lead::application::use_cases::update_lead::IUpdateLeadUseCase;
use crate::tests::support::stubs::*;
use crate::AppState;

pub struct TestAppStateBuilder {
    register_user: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    login_user: Arc<dyn ILoginUserUseCase + Send + Sync>,
    current_user: Arc<dyn ICurrentUserUseCase + Send + Sync>,
    create_lead: Arc<dyn ICreateLeadUseCase + Send + Sync>,
    list_leads: Arc<dyn IListLeadsUseCase + Send + Sync>,
    get_lead: Arc<dyn IGetLeadUseCase + Send + Sync>,
    update_lead: Arc<dyn IUpdateLeadUseCase + Send + Sync>,
    delete_lead: Arc<dyn IDeleteLeadUseCase + Send + Sync>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            register_user: Arc::new(StubRegisterUserUseCase),
            login_user: Arc::new(StubLoginUserUseCase),
            current_user: Arc::new(StubCurrentUserUseCase),
            create_lead: Arc::new(StubCreateLeadUseCase),
            list_leads: Arc::new(StubListLeadsUseCase),
            get_lead: Arc::new(StubGetLeadUseCase),
            update_lead: Arc::new(StubUpdateLeadUseCase),
            delete_lead: Arc::new(StubDeleteLeadUseCase),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_register_user(
        mut self,
        uc: impl IRegisterUserUseCase + Send + Sync + 'static,
    ) -> Self {
        self.register_user = Arc::new(uc);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + Send + Sync + 'static) -> Self {
        self.login_user = Arc::new(uc);
        self
    }

    pub fn with_current_user(
        mut self,
        uc: impl ICurrentUserUseCase + Send + Sync + 'static,
    ) -> Self {
        self.current_user = Arc::new(uc);
        self
    }

    pub fn with_create_lead(mut self, uc: impl ICreateLeadUseCase + Send + Sync + 'static) -> Self {
        self.create_lead = Arc::new(uc);
        self
    }

    pub fn with_list_leads(mut self, uc: impl IListLeadsUseCase + Send + Sync + 'static) -> Self {
        self.list_leads = Arc::new(uc);
        self
    }

    pub fn with_get_lead(mut self, uc: impl IGetLeadUseCase + Send + Sync + 'static) -> Self {
        self.get_lead = Arc::new(uc);
        self
    }

    pub fn with_update_lead(mut self, uc: impl IUpdateLeadUseCase + Send + Sync + 'static) -> Self {
        self.update_lead = Arc::new(uc);
        self
    }

    pub fn with_delete_lead(mut self, uc: impl IDeleteLeadUseCase + Send + Sync + 'static) -> Self {
        self.delete_lead = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            register_user_use_case: self.register_user,
            login_user_use_case: self.login_user,
            current_user_use_case: self.current_user,
            create_lead_use_case: self.create_lead,
            list_leads_use_case: self.list_leads,
            get_lead_use_case: self.get_lead,
            update_lead_use_case: self.update_lead,
            delete_lead_use_case: self.delete_lead,
        })
    }
}
