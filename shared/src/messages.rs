//! 界面提示文本 (pt-BR)

// 客户端校验
pub const LOGIN_FIELDS_REQUIRED: &str = "Usuário e senha são obrigatórios";
pub const REGISTER_FIELDS_REQUIRED: &str = "Todos os campos são obrigatórios";
pub const INVALID_EMAIL: &str = "Email inválido";
pub const TITLE_REQUIRED: &str = "Título é obrigatório";
pub const INVALID_STATUS: &str = "Status inválido";
pub const INVALID_PAGE_SIZE: &str = "Tamanho de página inválido";
pub const FILE_REQUIRED: &str = "Selecione um arquivo.";
pub const FILE_EMPTY: &str = "O arquivo está vazio.";
pub const FILE_TYPE_NOT_ALLOWED: &str = "Tipo de arquivo não permitido. Use PDF, PNG ou JPEG.";
pub const FILE_TOO_LARGE: &str = "Arquivo excede o tamanho máximo de 10 MB.";

// 后端失败时的兜底文本
pub const LOGIN_FAILED: &str = "Erro ao fazer login. Verifique suas credenciais.";
pub const REGISTER_FAILED: &str = "Erro ao registrar. Tente novamente.";
pub const LIST_FAILED: &str = "Erro ao carregar documentos.";
pub const LOAD_DOCUMENT_FAILED: &str = "Erro ao carregar documento.";
pub const SAVE_DOCUMENT_FAILED: &str = "Erro ao salvar documento.";
pub const CHANGE_STATUS_FAILED: &str = "Erro ao mudar status.";
pub const DELETE_DOCUMENT_FAILED: &str = "Erro ao deletar documento.";
pub const UPLOAD_FAILED: &str = "Erro ao fazer upload do arquivo.";
pub const LOAD_VERSIONS_FAILED: &str = "Erro ao carregar versões.";
pub const DOWNLOAD_FAILED: &str = "Erro ao baixar arquivo.";
pub const DELETE_VERSION_FAILED: &str = "Erro ao deletar versão.";

// 成功提示
pub const UPLOAD_SUCCESS: &str = "Arquivo enviado com sucesso!";
pub const DOCUMENT_CREATED: &str = "Documento criado com sucesso!";
pub const DOCUMENT_UPDATED: &str = "Documento atualizado com sucesso!";

// 确认对话框
pub const CONFIRM_DELETE_DOCUMENT: &str = "Tem certeza que deseja deletar este documento?";
pub const CONFIRM_DELETE_VERSION: &str = "Tem certeza que deseja deletar esta versão?";
