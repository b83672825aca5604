use super::User;

/// Everything needed to insert a new user row.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub tenant_url: String,
    pub organization: String,
}

impl From<CreateUserDto> for User {
    fn from(dto: CreateUserDto) -> Self {
        User {
            username: dto.username,
            password: dto.password,
            client_id: dto.client_id,
            client_secret: dto.client_secret,
            token_url: dto.token_url,
            tenant_url: dto.tenant_url,
            organization: dto.organization,
        }
    }
}
