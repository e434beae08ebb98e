use anyhow::Result;
use colored::*;
use dotenvy::dotenv;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use motorista_app::config::environment::EnvironmentConfig;
use motorista_app::models::auth::RegisterRequest;
use motorista_app::models::frete::{Frete, QuadroFretes};
use motorista_app::models::motorista::{Motorista, StatusDisponibilidade};
use motorista_app::services::api_service::ApiService;
use motorista_app::services::auth_service::AuthService;
use motorista_app::services::convite_service::ConviteService;
use motorista_app::services::frete_service::FreteService;
use motorista_app::services::status_service::StatusService;
use motorista_app::services::upload_service::UploadService;
use motorista_app::session::SessionStore;
use motorista_app::utils::validation::{formatar_data, formatar_valor};

struct App {
    auth: AuthService,
    fretes: FreteService,
    convites: ConviteService,
    status: StatusService,
    upload: UploadService,
    sessao: SessionStore,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Carregar variáveis de ambiente
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let config = EnvironmentConfig::default();

    println!("{}", "🚚 Motorista - Marketplace de Fretes".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    if config.is_development() {
        println!("🌐 API: {}", config.api_base_url.dimmed());
    }
    println!();

    let api = Arc::new(ApiService::new(&config));
    let sessao = SessionStore::new();
    let app = App {
        auth: AuthService::new(api.clone(), sessao.clone()),
        fretes: FreteService::new(api.clone()),
        convites: ConviteService::new(api.clone()),
        status: StatusService::new(api.clone(), sessao.clone()),
        upload: UploadService::new(&config, api.clone()),
        sessao,
    };

    loop {
        println!();
        println!("{}", "🔐 ACESSO".bright_green().bold());
        println!("1. Entrar");
        println!("2. Cadastrar");
        println!("3. Sair");

        match ler_linha("Selecione uma opção (1-3): ")?.as_str() {
            "1" => {
                if fazer_login(&app).await? {
                    menu_principal(&app).await?;
                }
            }
            "2" => fazer_cadastro(&app).await?,
            "3" => {
                println!("{}", "👋 Até logo!".bright_green());
                break;
            }
            _ => println!("{}", "❌ Opção inválida. Tente de novo.".bright_red()),
        }
    }

    Ok(())
}

async fn fazer_login(app: &App) -> Result<bool> {
    let email = ler_linha("Email: ")?;
    let senha = ler_linha("Senha: ")?;

    match app.auth.login(&email, &senha).await {
        Ok(motorista) => {
            println!();
            println!("{} {}", "✅ Bem-vindo,".bright_green(), motorista.nome.bold());
            Ok(true)
        }
        Err(e) => {
            println!("{} {}", "❌".bright_red(), e.to_string().bright_red());
            Ok(false)
        }
    }
}

async fn fazer_cadastro(app: &App) -> Result<()> {
    println!();
    println!("{}", "📝 CADASTRO DE MOTORISTA".bright_cyan().bold());

    let dados = RegisterRequest {
        nome: ler_linha("Nome completo: ")?,
        usuario: ler_linha("Usuário: ")?,
        cpf: ler_linha("CPF: ")?,
        email: ler_linha("Email: ")?,
        senha: ler_linha("Senha: ")?,
    };

    match app.auth.registrar(dados).await {
        Ok(mensagem) => println!("{} {}", "✅".bright_green(), mensagem),
        Err(e) => println!("{} {}", "❌".bright_red(), e.to_string().bright_red()),
    }
    Ok(())
}

async fn menu_principal(app: &App) -> Result<()> {
    if let Some(motorista_id) = app.sessao.motorista_id().await {
        if app.fretes.tem_pendentes(motorista_id).await {
            println!("{}", "🔔 Você tem fretes aguardando resposta!".bright_yellow());
        }
        if app.fretes.em_servico(motorista_id).await {
            println!("{}", "🚛 Você está com frete em andamento.".bright_cyan());
        }
    }

    loop {
        println!();
        println!("{}", "📋 MENU PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚛 Meus fretes");
        println!("2. ✅ Aceitar frete");
        println!("3. ❌ Recusar frete");
        println!("4. 📨 Convites");
        println!("5. 🔄 Alternar status");
        println!("6. 👤 Perfil");
        println!("7. 🚪 Sair da conta");

        match ler_linha("Selecione uma opção (1-7): ")?.as_str() {
            "1" => mostrar_fretes(app).await?,
            "2" => responder_frete(app, true).await?,
            "3" => responder_frete(app, false).await?,
            "4" => menu_convites(app).await?,
            "5" => alternar_status(app).await?,
            "6" => menu_perfil(app).await?,
            "7" => {
                app.auth.logout().await;
                println!("{}", "👋 Sessão encerrada.".bright_green());
                return Ok(());
            }
            _ => println!("{}", "❌ Opção inválida. Tente de novo.".bright_red()),
        }
    }
}

async fn mostrar_fretes(app: &App) -> Result<()> {
    let Some(motorista_id) = app.sessao.motorista_id().await else {
        return Ok(());
    };
    let quadro = app.fretes.carregar_todos(motorista_id).await;
    imprimir_quadro(&quadro);

    let Some(frete_id) = ler_id("Id do frete para ver detalhes (vazio para voltar): ")? else {
        return Ok(());
    };
    match app.fretes.buscar_detalhe(frete_id).await {
        Ok(detalhe) if detalhe.success => {
            if let Some(frete) = detalhe.frete {
                imprimir_detalhe(&frete);
            }
        }
        Ok(detalhe) => {
            let erro = detalhe.error.unwrap_or_else(|| "Frete não encontrado".to_string());
            println!("{} {}", "❌".bright_red(), erro.bright_red());
        }
        Err(e) => println!("{} {}", "❌".bright_red(), e.to_string().bright_red()),
    }
    Ok(())
}

fn imprimir_detalhe(frete: &Frete) {
    println!();
    println!("{}", format!("🚛 {}", frete.codigo_frete).bold());
    println!("  Empresa: {}", frete.nome_empresa);
    println!("  Rota:    {} → {}", frete.origem, frete.destino);
    println!("  Valor:   {}", formatar_valor(frete.valor));
    println!("  Carga:   {}", frete.tipo_carga);
    if let Some(distancia) = frete.distancia {
        println!("  Distância: {} km", distancia);
    }
    if let Some(peso) = frete.peso {
        println!("  Peso: {} kg", peso);
    }
    if let Some(eixos) = frete.eixos_requeridos {
        println!("  Eixos requeridos: {}", eixos);
    }
    if let Some(observacoes) = &frete.observacoes {
        println!("  Observações: {}", observacoes);
    }
}

fn imprimir_quadro(quadro: &QuadroFretes) {
    imprimir_lista("🟡 OFERECIDOS", &quadro.oferecidos);
    imprimir_lista("🟢 ATIVOS", &quadro.ativos);
    imprimir_lista("⚪ HISTÓRICO", &quadro.historico);
}

fn imprimir_lista(titulo: &str, fretes: &[Frete]) {
    println!();
    println!("{}", titulo.bold());
    if fretes.is_empty() {
        println!("  {}", "nenhum frete".dimmed());
        return;
    }
    for frete in fretes {
        let mut linha = format!(
            "  [{}] {} | {} → {} | {} | {}",
            frete.id,
            frete.codigo_frete,
            frete.origem,
            frete.destino,
            formatar_valor(frete.valor),
            frete.nome_empresa,
        );
        if let Some(data) = &frete.data_finalizacao {
            linha.push_str(&format!(" | finalizado em {}", formatar_data(data)));
        }
        println!("{}", linha);
    }
}

async fn responder_frete(app: &App, aceitar: bool) -> Result<()> {
    let Some(motorista_id) = app.sessao.motorista_id().await else {
        return Ok(());
    };
    let Some(frete_id) = ler_id("Id do frete: ")? else {
        return Ok(());
    };

    let resultado = if aceitar {
        app.fretes.aceitar(frete_id, motorista_id).await
    } else {
        let motivo = ler_linha("Motivo (vazio para o padrão): ")?;
        let observacoes = if motivo.is_empty() { None } else { Some(motivo) };
        app.fretes.recusar(frete_id, motorista_id, observacoes).await
    };

    match resultado {
        Ok(quadro) => {
            if aceitar {
                println!("{}", "✅ Frete aceito com sucesso!".bright_green());
            } else {
                println!("{}", "❌ O frete foi recusado.".bright_yellow());
            }
            imprimir_quadro(&quadro);
        }
        Err(e) => println!("{} {}", "❌".bright_red(), e.to_string().bright_red()),
    }
    Ok(())
}

async fn menu_convites(app: &App) -> Result<()> {
    let Some(motorista_id) = app.sessao.motorista_id().await else {
        return Ok(());
    };

    match app.convites.buscar(motorista_id).await {
        Ok(Some(resposta)) if resposta.success => {
            if resposta.convites.is_empty() {
                println!("{}", "📭 Nenhum convite pendente.".dimmed());
                return Ok(());
            }
            println!();
            println!("{}", "📨 CONVITES PENDENTES".bright_cyan().bold());
            for convite in &resposta.convites {
                let data = convite
                    .data_convite
                    .map(|d| formatar_data(&d))
                    .unwrap_or_else(|| "-".to_string());
                println!("  [{}] {} ({})", convite.id, convite.nome_empresa, data);
            }
        }
        Ok(Some(resposta)) => {
            let erro = resposta.error.unwrap_or_else(|| "Erro ao carregar convites".to_string());
            println!("{} {}", "❌".bright_red(), erro.bright_red());
            return Ok(());
        }
        Ok(None) => return Ok(()),
        Err(e) => {
            println!("{} {}", "❌".bright_red(), e.to_string().bright_red());
            return Ok(());
        }
    }

    let Some(convite_id) = ler_id("Id do convite (vazio para voltar): ")? else {
        return Ok(());
    };
    let resposta = match ler_linha("Aceitar (a) ou rejeitar (r)? ")?.as_str() {
        "a" => app.convites.aceitar(convite_id, motorista_id).await,
        "r" => app.convites.rejeitar(convite_id, motorista_id).await,
        _ => return Ok(()),
    };

    match resposta {
        Ok(ack) => {
            let mensagem = ack.message.unwrap_or_else(|| "Convite respondido".to_string());
            println!("{} {}", "✅".bright_green(), mensagem);
            // O vínculo com a empresa só aparece recarregando o perfil
            if let Some(id) = app.sessao.motorista_id().await {
                if let Err(e) = app.auth.buscar_dados(id).await {
                    println!("{} {}", "⚠️".bright_yellow(), e);
                }
            }
        }
        Err(e) => println!("{} {}", "❌".bright_red(), e.to_string().bright_red()),
    }
    Ok(())
}

async fn alternar_status(app: &App) -> Result<()> {
    match app.status.alternar().await {
        Ok(novo) => println!(
            "{} Seu status foi alterado para \"{}\"",
            "✅".bright_green(),
            novo.descricao().bold()
        ),
        Err(e) => println!("{} {}", "❌".bright_red(), e.to_string().bright_red()),
    }
    Ok(())
}

async fn menu_perfil(app: &App) -> Result<()> {
    let Some(motorista) = app.sessao.current().await else {
        return Ok(());
    };
    imprimir_perfil(&motorista);

    if ler_linha("Atualizar foto de perfil? (s/n) ")?.as_str() != "s" {
        return Ok(());
    }
    let caminho = PathBuf::from(ler_linha("Caminho da imagem: ")?);

    match app.upload.atualizar_foto_perfil(&caminho, motorista.id).await {
        Ok(imagem_url) => {
            println!("{} Foto atualizada: {}", "✅".bright_green(), imagem_url);
            // Substituir o registro inteiro da sessão com a URL nova
            let mut atualizado = motorista;
            atualizado.imagem_url = Some(imagem_url);
            app.sessao.replace(atualizado).await;
        }
        Err(e) => println!("{} {}", "❌".bright_red(), e.to_string().bright_red()),
    }
    Ok(())
}

fn imprimir_perfil(motorista: &Motorista) {
    println!();
    println!("{}", "👤 PERFIL".bright_cyan().bold());
    println!("  Nome:    {}", motorista.nome);
    println!("  Usuário: {}", motorista.usuario);
    println!("  Email:   {}", motorista.email);
    println!("  Código:  {}", motorista.codigo.as_deref().unwrap_or("N/A"));
    println!(
        "  Status:  {}",
        motorista.status_disponibilidade.descricao()
    );
    let agregado = if motorista.agregado() { "Sim" } else { "Não" };
    println!("  Agregado a empresa: {}", agregado);
    if motorista.status_disponibilidade == StatusDisponibilidade::EmFrete {
        println!(
            "  {}",
            "Você está em serviço. O status será alterado automaticamente quando o frete for finalizado."
                .dimmed()
        );
    }
}

fn ler_linha(prompt: &str) -> Result<String> {
    print!("{}", prompt.bright_yellow());
    io::stdout().flush()?;
    let mut linha = String::new();
    io::stdin().read_line(&mut linha)?;
    Ok(linha.trim().to_string())
}

fn ler_id(prompt: &str) -> Result<Option<i64>> {
    let texto = ler_linha(prompt)?;
    if texto.is_empty() {
        return Ok(None);
    }
    match texto.parse() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("{}", "❌ Id inválido.".bright_red());
            Ok(None)
        }
    }
}
