//! Testes de integração contra uma API de mock em processo
//!
//! Cada teste sobe um `Router` do axum em porta efêmera e aponta o
//! cliente real para ele.

use axum::extract::{Json, Path};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Router;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use motorista_app::models::auth::RegisterRequest;
use motorista_app::models::motorista::{Motorista, StatusDisponibilidade};
use motorista_app::services::api_service::ApiService;
use motorista_app::services::auth_service::AuthService;
use motorista_app::services::convite_service::ConviteService;
use motorista_app::services::frete_service::{FreteService, OBSERVACAO_RECUSA_PADRAO};
use motorista_app::services::status_service::StatusService;
use motorista_app::services::upload_service::UploadService;
use motorista_app::session::SessionStore;
use motorista_app::utils::errors::ApiError;
use motorista_app::EnvironmentConfig;

async fn servir(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(base_url: &str) -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "development".to_string(),
        api_base_url: base_url.to_string(),
        upload_base_url: base_url.to_string(),
        request_timeout_secs: 5,
    }
}

fn api(base_url: &str) -> Arc<ApiService> {
    Arc::new(ApiService::new(&config(base_url)))
}

fn frete_json(id: i64) -> Value {
    json!({
        "id": id,
        "codigo_frete": format!("FRT-{:04}", id),
        "nome_empresa": "Transportes Andrade",
        "origem": "São Paulo - SP",
        "destino": "Curitiba - PR",
        "valor": 3500.0,
        "tipo_carga": "Carga seca"
    })
}

fn motorista_json(id: i64) -> Value {
    json!({
        "id": id,
        "nome": "João Silva",
        "usuario": "joaosilva",
        "cpf": "11122233344",
        "email": "joao@email.com",
        "imagem_url": null,
        "codigo": "MOT-0007",
        "empresa_id": null,
        "status_disponibilidade": "livre"
    })
}

// ---------------------------------------------------------------------------
// Cliente base: mapeamento de erros
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_erro_http_usa_campo_error_do_corpo() {
    let app = Router::new().route(
        "/health",
        get(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Requisição inválida"})),
            )
        }),
    );
    let base = servir(app).await;

    let erro = api(&base)
        .get::<Value>("/health")
        .await
        .unwrap_err();
    match erro {
        ApiError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Requisição inválida");
        }
        outro => panic!("esperava Http, veio {:?}", outro),
    }
}

#[tokio::test]
async fn test_erro_http_sem_campo_error_gera_mensagem_generica() {
    let app = Router::new().route(
        "/health",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false})),
            )
        }),
    );
    let base = servir(app).await;

    let erro = api(&base)
        .get::<Value>("/health")
        .await
        .unwrap_err();
    match erro {
        ApiError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Erro HTTP: 500");
        }
        outro => panic!("esperava Http, veio {:?}", outro),
    }
}

#[tokio::test]
async fn test_timeout_vira_erro_de_timeout() {
    let app = Router::new().route(
        "/health",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({"status": "ok"}))
        }),
    );
    let base = servir(app).await;

    let mut cfg = config(&base);
    cfg.request_timeout_secs = 1;
    let api = ApiService::new(&cfg);

    let erro = api.get::<Value>("/health").await.unwrap_err();
    assert!(matches!(erro, ApiError::Timeout));
}

#[tokio::test]
async fn test_conexao_recusada_vira_erro_de_rede() {
    // Porta reservada e liberada: a conexão será recusada
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let erro = api(&base)
        .get::<Value>("/health")
        .await
        .unwrap_err();
    assert!(matches!(erro, ApiError::Network(_)));
}

// ---------------------------------------------------------------------------
// Autenticação
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_cadastro_envia_cpf_apenas_com_digitos() {
    let capturado: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let cap = capturado.clone();

    let app = Router::new().route(
        "/api/auth/register-motorista",
        post(move |Json(corpo): Json<Value>| {
            let cap = cap.clone();
            async move {
                *cap.lock().unwrap() = Some(corpo);
                Json(json!({"message": "Motorista cadastrado com sucesso"}))
            }
        }),
    );
    let base = servir(app).await;

    let auth = AuthService::new(api(&base), SessionStore::new());
    let mensagem = auth
        .registrar(RegisterRequest {
            nome: " Maria Souza ".to_string(),
            usuario: " MariaS ".to_string(),
            cpf: "111.222.333-44".to_string(),
            email: " Maria@Email.COM ".to_string(),
            senha: "segredo1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(mensagem, "Motorista cadastrado com sucesso");

    let corpo = capturado.lock().unwrap().take().unwrap();
    assert_eq!(corpo["cpf"], "11122233344");
    assert_eq!(corpo["email"], "maria@email.com");
    assert_eq!(corpo["usuario"], "marias");
    assert_eq!(corpo["nome"], "Maria Souza");
}

#[tokio::test]
async fn test_login_grava_motorista_na_sessao() {
    // Backend antigo devolve o registro no campo `usuario`
    let app = Router::new().route(
        "/api/auth/login-motorista",
        post(|| async {
            Json(json!({
                "message": "Login realizado com sucesso",
                "usuario": motorista_json(7)
            }))
        }),
    );
    let base = servir(app).await;

    let sessao = SessionStore::new();
    let auth = AuthService::new(api(&base), sessao.clone());
    let motorista = auth.login("  Joao@Email.com ", "senha123").await.unwrap();

    assert_eq!(motorista.id, 7);
    assert_eq!(sessao.motorista_id().await, Some(7));
    assert_eq!(sessao.version().await, 1);
}

#[tokio::test]
async fn test_login_sem_credenciais_nao_chama_a_rede() {
    let auth = AuthService::new(api("http://127.0.0.1:1"), SessionStore::new());
    let erro = auth.login("", "").await.unwrap_err();
    assert!(matches!(erro, ApiError::Domain(_)));
    assert_eq!(erro.to_string(), "Email e senha são obrigatórios");
}

// ---------------------------------------------------------------------------
// Fretes
// ---------------------------------------------------------------------------

/// Estado compartilhado: aceitar move o frete de oferecidos para ativos
struct EstadoFretes {
    oferecidos: Mutex<Vec<i64>>,
    ativos: Mutex<Vec<i64>>,
    corpo_recusa: Mutex<Option<Value>>,
}

fn app_fretes(estado: Arc<EstadoFretes>) -> Router {
    let e1 = estado.clone();
    let e2 = estado.clone();
    let e3 = estado.clone();
    let e4 = estado.clone();

    Router::new()
        .route(
            "/fretes/motorista/:id/oferecidos",
            get(move |_: Path<i64>| {
                let estado = e1.clone();
                async move {
                    let fretes: Vec<Value> = estado
                        .oferecidos
                        .lock()
                        .unwrap()
                        .iter()
                        .map(|id| frete_json(*id))
                        .collect();
                    Json(json!({"success": true, "fretes": fretes}))
                }
            }),
        )
        .route(
            "/fretes/motorista/:id/ativos",
            get(move |_: Path<i64>| {
                let estado = e2.clone();
                async move {
                    let fretes: Vec<Value> = estado
                        .ativos
                        .lock()
                        .unwrap()
                        .iter()
                        .map(|id| frete_json(*id))
                        .collect();
                    Json(json!({"success": true, "fretes": fretes}))
                }
            }),
        )
        .route(
            "/fretes/motorista/:id/historico",
            get(|_: Path<i64>| async { Json(json!({"success": true, "fretes": []})) }),
        )
        .route(
            "/fretes/:id/aceitar",
            put(move |Path(frete_id): Path<i64>, Json(_): Json<Value>| {
                let estado = e3.clone();
                async move {
                    estado.oferecidos.lock().unwrap().retain(|id| *id != frete_id);
                    estado.ativos.lock().unwrap().push(frete_id);
                    Json(json!({"success": true}))
                }
            }),
        )
        .route(
            "/fretes/:id/recusar",
            put(move |Path(frete_id): Path<i64>, Json(corpo): Json<Value>| {
                let estado = e4.clone();
                async move {
                    estado.oferecidos.lock().unwrap().retain(|id| *id != frete_id);
                    *estado.corpo_recusa.lock().unwrap() = Some(corpo);
                    Json(json!({"success": true}))
                }
            }),
        )
}

#[tokio::test]
async fn test_aceitar_frete_recarrega_as_listas() {
    let estado = Arc::new(EstadoFretes {
        oferecidos: Mutex::new(vec![10, 11]),
        ativos: Mutex::new(vec![]),
        corpo_recusa: Mutex::new(None),
    });
    let base = servir(app_fretes(estado)).await;

    let fretes = FreteService::new(api(&base));
    let quadro = fretes.aceitar(10, 1).await.unwrap();

    assert!(quadro.ativos.iter().any(|f| f.id == 10));
    assert!(!quadro.oferecidos.iter().any(|f| f.id == 10));
    assert!(quadro.oferecidos.iter().any(|f| f.id == 11));
    assert!(quadro.em_servico());
}

#[tokio::test]
async fn test_aceitar_frete_ja_tomado_e_rejeicao_autoritativa() {
    let app = Router::new().route(
        "/fretes/:id/aceitar",
        put(|_: Path<i64>, Json(_): Json<Value>| async {
            Json(json!({
                "success": false,
                "error": "Frete já aceito por outro motorista"
            }))
        }),
    );
    let base = servir(app).await;

    let fretes = FreteService::new(api(&base));
    let erro = fretes.aceitar(10, 1).await.unwrap_err();
    assert_eq!(erro.to_string(), "Frete já aceito por outro motorista");
    assert!(matches!(erro, ApiError::Domain(_)));
}

#[tokio::test]
async fn test_recusar_sem_motivo_envia_observacao_padrao() {
    let estado = Arc::new(EstadoFretes {
        oferecidos: Mutex::new(vec![22]),
        ativos: Mutex::new(vec![]),
        corpo_recusa: Mutex::new(None),
    });
    let base = servir(app_fretes(estado.clone())).await;

    let fretes = FreteService::new(api(&base));
    fretes.recusar(22, 1, None).await.unwrap();

    let corpo = estado.corpo_recusa.lock().unwrap().take().unwrap();
    assert_eq!(corpo["motoristaId"], 1);
    assert_eq!(corpo["observacoes"], OBSERVACAO_RECUSA_PADRAO);
}

#[tokio::test]
async fn test_recusar_com_motivo_envia_o_motivo() {
    let estado = Arc::new(EstadoFretes {
        oferecidos: Mutex::new(vec![23]),
        ativos: Mutex::new(vec![]),
        corpo_recusa: Mutex::new(None),
    });
    let base = servir(app_fretes(estado.clone())).await;

    let fretes = FreteService::new(api(&base));
    fretes
        .recusar(23, 1, Some("Caminhão em manutenção".to_string()))
        .await
        .unwrap();

    let corpo = estado.corpo_recusa.lock().unwrap().take().unwrap();
    assert_eq!(corpo["observacoes"], "Caminhão em manutenção");
}

#[tokio::test]
async fn test_resposta_antiga_de_lista_e_descartada() {
    // A primeira requisição demora; a segunda resolve antes. A resposta
    // antiga deve ser descartada, não renderizada.
    let contador = Arc::new(AtomicU32::new(0));
    let app = Router::new().route(
        "/fretes/motorista/:id/oferecidos",
        get(move |_: Path<i64>| {
            let contador = contador.clone();
            async move {
                let n = contador.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    Json(json!({"success": true, "fretes": [frete_json(1)]}))
                } else {
                    Json(json!({"success": true, "fretes": [frete_json(1), frete_json(2)]}))
                }
            }
        }),
    );
    let base = servir(app).await;

    let fretes = Arc::new(FreteService::new(api(&base)));

    let lento = {
        let fretes = fretes.clone();
        tokio::spawn(async move { fretes.buscar_oferecidos(1).await })
    };
    // Garantir que o ticket da busca lenta foi emitido primeiro
    tokio::time::sleep(Duration::from_millis(100)).await;

    let rapido = fretes.buscar_oferecidos(1).await.unwrap();
    assert_eq!(rapido.unwrap().fretes.len(), 2);

    let resultado_lento = lento.await.unwrap().unwrap();
    assert!(resultado_lento.is_none(), "resposta obsoleta deveria ser descartada");
}

#[tokio::test]
async fn test_carregar_todos_degrada_lista_com_erro() {
    let app = Router::new()
        .route(
            "/fretes/motorista/:id/oferecidos",
            get(|_: Path<i64>| async {
                Json(json!({"success": true, "fretes": [frete_json(1)]}))
            }),
        )
        .route(
            "/fretes/motorista/:id/ativos",
            get(|_: Path<i64>| async {
                Json(json!({"success": false, "error": "Falha interna"}))
            }),
        )
        .route(
            "/fretes/motorista/:id/historico",
            get(|_: Path<i64>| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Banco indisponível"})),
                )
            }),
        );
    let base = servir(app).await;

    let fretes = FreteService::new(api(&base));
    let quadro = fretes.carregar_todos(1).await;

    assert_eq!(quadro.oferecidos.len(), 1);
    assert!(quadro.ativos.is_empty());
    assert!(quadro.historico.is_empty());
}

#[tokio::test]
async fn test_detalhe_e_helpers_de_painel() {
    let estado = Arc::new(EstadoFretes {
        oferecidos: Mutex::new(vec![30]),
        ativos: Mutex::new(vec![]),
        corpo_recusa: Mutex::new(None),
    });
    let app = app_fretes(estado).route(
        "/fretes/:id",
        get(|Path(id): Path<i64>| async move {
            Json(json!({"success": true, "frete": frete_json(id)}))
        }),
    );
    let base = servir(app).await;

    let fretes = FreteService::new(api(&base));
    let detalhe = fretes.buscar_detalhe(30).await.unwrap();
    assert!(detalhe.success);
    assert_eq!(detalhe.frete.unwrap().codigo_frete, "FRT-0030");

    assert!(fretes.tem_pendentes(1).await);
    assert!(!fretes.em_servico(1).await);
}

// ---------------------------------------------------------------------------
// Convites
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_convites_listar_e_aceitar() {
    let app = Router::new()
        .route(
            "/api/auth/motorista/:id/convites",
            get(|_: Path<i64>| async {
                Json(json!({
                    "success": true,
                    "convites": [{
                        "id": 4,
                        "nome_empresa": "Logística Horizonte",
                        "data_convite": "2025-06-01T09:30:00Z"
                    }]
                }))
            }),
        )
        .route(
            "/api/auth/convites/:id/aceitar",
            put(|Path(id): Path<i64>, Json(corpo): Json<Value>| async move {
                assert_eq!(id, 4);
                assert_eq!(corpo["motoristaId"], 7);
                Json(json!({"success": true, "message": "Convite aceito com sucesso"}))
            }),
        );
    let base = servir(app).await;

    let convites = ConviteService::new(api(&base));
    let lista = convites.buscar(7).await.unwrap().unwrap();
    assert_eq!(lista.convites.len(), 1);
    assert_eq!(lista.convites[0].nome_empresa, "Logística Horizonte");

    let ack = convites.aceitar(4, 7).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Convite aceito com sucesso"));
}

#[tokio::test]
async fn test_rejeitar_convite_com_falha_de_negocio() {
    let app = Router::new().route(
        "/api/auth/convites/:id/rejeitar",
        put(|_: Path<i64>, Json(_): Json<Value>| async {
            Json(json!({"success": false, "error": "Convite já respondido"}))
        }),
    );
    let base = servir(app).await;

    let convites = ConviteService::new(api(&base));
    let erro = convites.rejeitar(4, 7).await.unwrap_err();
    assert_eq!(erro.to_string(), "Convite já respondido");
}

// ---------------------------------------------------------------------------
// Status de disponibilidade
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_atualizar_status_grava_na_sessao() {
    let capturado: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let cap = capturado.clone();

    let app = Router::new().route(
        "/api/auth/motorista/:id/status",
        put(move |_: Path<i64>, Json(corpo): Json<Value>| {
            let cap = cap.clone();
            async move {
                *cap.lock().unwrap() = Some(corpo);
                Json(json!({"success": true}))
            }
        }),
    );
    let base = servir(app).await;

    let sessao = SessionStore::new();
    let motorista: Motorista = serde_json::from_value(motorista_json(7)).unwrap();
    sessao.replace(motorista).await;

    let status = StatusService::new(api(&base), sessao.clone());
    let novo = status
        .atualizar(StatusDisponibilidade::Indisponivel)
        .await
        .unwrap();

    assert_eq!(novo, StatusDisponibilidade::Indisponivel);
    assert_eq!(
        sessao.current().await.unwrap().status_disponibilidade,
        StatusDisponibilidade::Indisponivel
    );

    let corpo = capturado.lock().unwrap().take().unwrap();
    assert_eq!(corpo["status_disponibilidade"], "indisponivel");
}

#[tokio::test]
async fn test_alternar_faz_o_ciclo_livre_indisponivel() {
    let app = Router::new().route(
        "/api/auth/motorista/:id/status",
        put(|_: Path<i64>, Json(_): Json<Value>| async { Json(json!({"success": true})) }),
    );
    let base = servir(app).await;

    let sessao = SessionStore::new();
    let motorista: Motorista = serde_json::from_value(motorista_json(7)).unwrap();
    sessao.replace(motorista).await;

    let status = StatusService::new(api(&base), sessao.clone());
    assert_eq!(
        status.alternar().await.unwrap(),
        StatusDisponibilidade::Indisponivel
    );
    assert_eq!(status.alternar().await.unwrap(), StatusDisponibilidade::Livre);
}

// ---------------------------------------------------------------------------
// Upload de foto
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_upload_de_foto_e_gravacao_da_url() {
    let corpo_imagem: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let cap = corpo_imagem.clone();

    let app = Router::new()
        .route(
            "/images/upload-foto",
            post(|mut multipart: axum::extract::Multipart| async move {
                let mut tem_imagem = false;
                let mut user_id = String::new();
                while let Some(campo) = multipart.next_field().await.unwrap() {
                    match campo.name().unwrap_or_default() {
                        "image" => {
                            tem_imagem = !campo.bytes().await.unwrap().is_empty();
                        }
                        "userId" => {
                            user_id = campo.text().await.unwrap();
                        }
                        _ => {}
                    }
                }
                assert!(tem_imagem);
                assert_eq!(user_id, "7");
                Json(json!({
                    "success": true,
                    "imageUrl": "https://cdn.exemplo.com/fotos/7.jpg"
                }))
            }),
        )
        .route(
            "/usuarios/:id/imagem",
            put(move |_: Path<i64>, Json(corpo): Json<Value>| {
                let cap = cap.clone();
                async move {
                    *cap.lock().unwrap() = Some(corpo);
                    Json(json!({"success": true}))
                }
            }),
        );
    let base = servir(app).await;

    let caminho = std::env::temp_dir().join("foto_teste_motorista.jpg");
    tokio::fs::write(&caminho, b"jpegfake").await.unwrap();

    let cfg = config(&base);
    let upload = UploadService::new(&cfg, api(&base));
    let url = upload.atualizar_foto_perfil(&caminho, 7).await.unwrap();

    assert_eq!(url, "https://cdn.exemplo.com/fotos/7.jpg");
    let corpo = corpo_imagem.lock().unwrap().take().unwrap();
    assert_eq!(corpo["imagem_url"], "https://cdn.exemplo.com/fotos/7.jpg");

    tokio::fs::remove_file(&caminho).await.ok();
}
