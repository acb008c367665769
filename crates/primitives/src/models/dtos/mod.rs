pub mod provider_dto;
pub mod request_dto;
pub mod response_dto;
pub mod webhook_dto;
