//! Default use-case stubs for handler tests. Each one fails loudly so a
//! test exercising the wrong slot is caught immediately.

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::use_cases::current_user::{
    CurrentUserError, ICurrentUserUseCase,
};
use crate::modules::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse, UserInfo,
};
use crate::modules::auth::application::use_cases::register_user::{
    IRegisterUserUseCase, RegisterError, RegisterRequest, RegisterUserResponse,
};
use crate::modules::lead::application::domain::filter::ListLeadsQuery;
use crate::modules::lead::application::ports::outgoing::lead_repository::LeadRecord;
use crate::modules::lead::application::use_cases::create_lead::{
    CreateLeadError, CreateLeadRequest, ICreateLeadUseCase,
};
use crate::modules::lead::application::use_cases::delete_lead::{DeleteLeadError, IDeleteLeadUseCase};
use crate::modules::lead::application::use_cases::get_lead::{GetLeadError, IGetLeadUseCase};
use crate::modules::lead::application::use_cases::list_leads::{
    IListLeadsUseCase, ListLeadsError, ListLeadsResponse,
};
use crate::modules::lead::application::use_cases::update_lead::{
    IUpdateLeadUseCase, UpdateLeadError, UpdateLeadRequest,
};

const NOT_WIRED: &str = "not wired in this test";

pub struct StubRegisterUserUseCase;

#[async_trait]
impl IRegisterUserUseCase for StubRegisterUserUseCase {
    async fn execute(
        &self,
        _request: RegisterRequest,
    ) -> Result<RegisterUserResponse, RegisterError> {
        Err(RegisterError::RepositoryError(NOT_WIRED.to_string()))
    }
}

pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        Err(LoginError::RepositoryError(NOT_WIRED.to_string()))
    }
}

pub struct StubCurrentUserUseCase;

#[async_trait]
impl ICurrentUserUseCase for StubCurrentUserUseCase {
    async fn execute(&self, _user_id: Uuid) -> Result<UserInfo, CurrentUserError> {
        Err(CurrentUserError::RepositoryError(NOT_WIRED.to_string()))
    }
}

pub struct StubCreateLeadUseCase;

#[async_trait]
impl ICreateLeadUseCase for StubCreateLeadUseCase {
    async fn execute(
        &self,
        _request: CreateLeadRequest,
        _owner_id: Uuid,
    ) -> Result<LeadRecord, CreateLeadError> {
        Err(CreateLeadError::RepositoryError(NOT_WIRED.to_string()))
    }
}

pub struct StubListLeadsUseCase;

#[async_trait]
impl IListLeadsUseCase for StubListLeadsUseCase {
    async fn execute(&self, _query: ListLeadsQuery) -> Result<ListLeadsResponse, ListLeadsError> {
        Err(ListLeadsError::RepositoryError(NOT_WIRED.to_string()))
    }
}

pub struct StubGetLeadUseCase;

#[async_trait]
impl IGetLeadUseCase for StubGetLeadUseCase {
    async fn execute(&self, _id: Uuid) -> Result<LeadRecord, GetLeadError> {
        Err(GetLeadError::RepositoryError(NOT_WIRED.to_string()))
    }
}

pub struct StubUpdateLeadUseCase;

#[async_trait]
impl IUpdateLeadUseCase for StubUpdateLeadUseCase {
    async fn execute(
        &self,
        _id: Uuid,
        _request: UpdateLeadRequest,
    ) -> Result<LeadRecord, UpdateLeadError> {
        Err(UpdateLeadError::RepositoryError(NOT_WIRED.to_string()))
    }
}

pub struct StubDeleteLeadUseCase;

#[async_trait]
impl IDeleteLeadUseCase for StubDeleteLeadUseCase {
    async fn execute(&self, _id: Uuid) -> Result<(), DeleteLeadError> {
        Err(DeleteLeadError::RepositoryError(NOT_WIRED.to_string()))
    }
}
