//! The default catalog shipped with the crate.
//!
//! Keyword tables and phrasing bodies are bilingual (Korean/English),
//! matching the instruction corpus the rubric was calibrated on.

use super::spec::*;
use crate::contradiction::ContradictionFamily;
use crate::types::{Complexity, Domain, Intent, Principle, Severity};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn weighted(items: &[(&str, f64)]) -> Vec<WeightedKeywordSpec> {
    items
        .iter()
        .map(|(keyword, weight)| WeightedKeywordSpec {
            keyword: keyword.to_string(),
            weight: *weight,
        })
        .collect()
}

/// Build the default catalog spec.
pub fn spec() -> CatalogSpec {
    CatalogSpec {
        domains: domains(),
        intents: intents(),
        principles: principles(),
        roles: roles(),
        context_phrases: context_phrases(),
        format_guides: FormatGuidesSpec {
            low: "명확하고 간결하게".to_string(),
            medium: "핵심 포인트별로 정리해서".to_string(),
            high: "구조화된 형식으로 각 항목을 명확히 구분해서".to_string(),
        },
        constraint_phrases: ConstraintPhrasesSpec {
            generic: strings(&[
                "불필요한 기술 용어는 피해주세요",
                "실용적이지 않은 내용은 제외해주세요",
                "지나치게 이론적인 설명은 자제해주세요",
            ]),
            per_domain: vec![
                DomainConstraintSpec {
                    domain: Domain::Development,
                    phrase: "실제 사용되지 않는 코드 예시는 포함하지 말아주세요".to_string(),
                },
                DomainConstraintSpec {
                    domain: Domain::Marketing,
                    phrase: "과장된 표현은 피해주세요".to_string(),
                },
                DomainConstraintSpec {
                    domain: Domain::Content,
                    phrase: "선정적인 표현은 자제해주세요".to_string(),
                },
                DomainConstraintSpec {
                    domain: Domain::Business,
                    phrase: "실현 불가능한 제안은 제외해주세요".to_string(),
                },
            ],
        },
        compaction_rules: compaction_rules(),
        contradiction_rules: contradiction_rules(),
        prohibition_keywords: strings(&["never", "do not", "must not", "절대", "하지 마"]),
        requirement_keywords: strings(&["always", "immediately", "항상", "즉시"]),
        anti_patterns: anti_patterns(),
        tool_preamble: ToolPreambleSpec {
            components: strings(&[
                "Rephrase the user's goal before calling any tool",
                "Outline a structured plan of the tool calls you intend to make",
                "Narrate each step as you execute it",
                "Summarize completed work distinctly from the upfront plan",
            ]),
            examples: strings(&[
                "\"I'll first search the codebase, then apply the fix and run the tests.\"",
                "\"Step 2 of 3 complete; running validation next.\"",
            ]),
        },
        agentic_tiers: agentic_tiers(),
        xml_templates: XmlTemplatesSpec {
            basic: "<role>\n{role}\n</role>\n\n<task>\n{task}\n</task>\n\n<constraints>\n{constraints}\n</constraints>"
                .to_string(),
            agentic: "<tool_preambles>\n{preambles}\n</tool_preambles>\n\n<persistence>\n{persistence}\n</persistence>\n\n<exploration>\n{escapes}\n</exploration>\n\n<constraints>\n{constraints}\n</constraints>"
                .to_string(),
        },
        templates: templates(),
    }
}

fn domains() -> Vec<DomainKeywordsSpec> {
    vec![
        DomainKeywordsSpec {
            domain: Domain::Development,
            simple: strings(&[
                "코드", "프로그래밍", "개발", "버그", "디버깅", "알고리즘", "아키텍처", "리뷰",
                "테스트", "배포", "빌드", "함수", "클래스", "api", "데이터베이스", "서버",
            ]),
            compound: strings(&[
                "release note", "릴리즈 노트", "릴리스 노트", "change log", "changelog",
                "변경 로그", "commit message", "커밋 메시지", "pull request", "코드 리뷰",
                "기술 문서", "api 문서", "api documentation", "git", "깃허브", "github",
            ]),
            weighted: weighted(&[
                ("release", 3.0),
                ("commit", 3.0),
                ("deploy", 2.5),
                ("build", 2.0),
                ("git", 2.5),
                ("repository", 2.0),
                ("version", 2.0),
            ]),
        },
        DomainKeywordsSpec {
            domain: Domain::Marketing,
            simple: strings(&[
                "마케팅", "광고", "캠페인", "프로모션", "브랜드", "고객", "시장", "세일즈",
            ]),
            compound: strings(&[
                "광고 캠페인", "마케팅 전략", "소셜 미디어 마케팅", "이메일 마케팅",
            ]),
            weighted: weighted(&[("캠페인", 2.5), ("광고", 2.0), ("홍보", 2.0)]),
        },
        DomainKeywordsSpec {
            domain: Domain::Content,
            simple: strings(&[
                "글", "블로그", "콘텐츠", "기사", "소셜", "미디어", "에세이", "뉴스레터",
            ]),
            compound: strings(&[
                "블로그 포스트", "소셜 미디어 포스트", "인스타그램 게시물", "트위터 트윗",
            ]),
            weighted: weighted(&[("블로그", 2.0), ("포스트", 1.5), ("게시물", 1.5)]),
        },
        DomainKeywordsSpec {
            domain: Domain::Business,
            simple: strings(&[
                "비즈니스", "보고서", "이메일", "프레젠테이션", "계획", "전략", "분석", "의사결정",
            ]),
            compound: strings(&[
                "사업 계획서", "비즈니스 보고서", "이메일 초안", "회의 안건",
            ]),
            weighted: weighted(&[("보고서", 2.0), ("계획서", 2.0), ("전략", 1.5)]),
        },
    ]
}

fn intents() -> Vec<IntentKeywordsSpec> {
    vec![
        IntentKeywordsSpec {
            intent: Intent::Create,
            keywords: strings(&["만들", "생성", "작성", "개발", "구축", "제작"]),
        },
        IntentKeywordsSpec {
            intent: Intent::Analyze,
            keywords: strings(&["분석", "리뷰", "평가", "검토", "진단", "조사"]),
        },
        IntentKeywordsSpec {
            intent: Intent::Optimize,
            keywords: strings(&["최적화", "개선", "향상", "효율"]),
        },
        IntentKeywordsSpec {
            intent: Intent::Explain,
            keywords: strings(&["설명", "가르쳐", "알려줘", "소개", "개요"]),
        },
        IntentKeywordsSpec {
            intent: Intent::Fix,
            keywords: strings(&["수정", "해결", "버그", "문제", "오류", "고쳐줘"]),
        },
        IntentKeywordsSpec {
            intent: Intent::Compare,
            keywords: strings(&["비교", "차이", "장단점", "비교해", "대비"]),
        },
        IntentKeywordsSpec {
            intent: Intent::Plan,
            keywords: strings(&["계획", "전략", "방안", "로드맵", "단계"]),
        },
    ]
}

fn principles() -> Vec<PrincipleRubricSpec> {
    vec![
        PrincipleRubricSpec {
            principle: Principle::Clarity,
            keywords: strings(&["구체적", "명확", "자세히", "상세", "정확"]),
            indicators: strings(&["목표", "요구사항", "원하는 결과"]),
        },
        PrincipleRubricSpec {
            principle: Principle::Context,
            keywords: strings(&["배경", "상황", "맥락", "정보", "관련"]),
            indicators: strings(&["배경 설명", "관련 정보", "상황 설명"]),
        },
        PrincipleRubricSpec {
            principle: Principle::Examples,
            keywords: strings(&["예시", "예를 들어", "예", "사례", "구체적으로"]),
            indicators: strings(&["실제 예시", "구체적인 경우", "예시 포함"]),
        },
        PrincipleRubricSpec {
            principle: Principle::Structure,
            keywords: strings(&["순서", "단계", "구조", "체계", "논리"]),
            indicators: strings(&["단계별 설명", "구조화된 요청", "논리적 흐름"]),
        },
        PrincipleRubricSpec {
            principle: Principle::Role,
            keywords: strings(&["역할", "페르소나", "전문가", "관점", "입장"]),
            indicators: strings(&["역할 정의", "전문가 관점", "특정 페르소나"]),
        },
        PrincipleRubricSpec {
            principle: Principle::Format,
            keywords: strings(&["형식", "방식", "구조", "템플릿", "스타일"]),
            indicators: strings(&["출력 형식", "결과 구조", "표현 방식"]),
        },
        PrincipleRubricSpec {
            principle: Principle::Constraints,
            keywords: strings(&["하지 않도록", "피해주세요", "제외", "금지", "주의"]),
            indicators: strings(&["제약 조건", "금지 사항", "주의사항"]),
        },
    ]
}

fn roles() -> Vec<RoleSetSpec> {
    vec![
        RoleSetSpec {
            domain: Domain::Development,
            expert: "시니어 개발자로서".to_string(),
            analyst: None,
            debugger: Some("디버깅 전문가로서".to_string()),
        },
        RoleSetSpec {
            domain: Domain::Marketing,
            expert: "마케팅 전문가로서".to_string(),
            analyst: Some("마켓 분석가로서".to_string()),
            debugger: None,
        },
        RoleSetSpec {
            domain: Domain::Content,
            expert: "콘텐츠 전문가로서".to_string(),
            analyst: None,
            debugger: None,
        },
        RoleSetSpec {
            domain: Domain::Business,
            expert: "비즈니스 전문가로서".to_string(),
            analyst: Some("비즈니스 분석가로서".to_string()),
            debugger: None,
        },
    ]
}

fn context_phrases() -> Vec<ContextPhraseSpec> {
    vec![
        ContextPhraseSpec {
            domain: Domain::Development,
            phrase: "실제 개발 환경에서 사용되는 코드를 고려하여".to_string(),
        },
        ContextPhraseSpec {
            domain: Domain::Marketing,
            phrase: "실제 비즈니스 상황과 타겟 고객을 고려하여".to_string(),
        },
        ContextPhraseSpec {
            domain: Domain::Content,
            phrase: "실제 독자의 관심사와 검색 의도를 고려하여".to_string(),
        },
        ContextPhraseSpec {
            domain: Domain::Business,
            phrase: "실제 비즈니스 의사결정 과정을 고려하여".to_string(),
        },
    ]
}

fn compaction_rules() -> Vec<CompactionRuleSpec> {
    let rules: [(&str, &str); 18] = [
        (r"자세히\s*설명해주시면\s*감사하겠습니다", "설명해주세요"),
        (r"자세히\s*설명해주세요", "설명해주세요"),
        (r"상세히\s*알려주세요", "알려주세요"),
        (r"가능한\s*자세히", "자세히"),
        (r"차근차근\s*설명해서", "설명해서"),
        (r"친절하게\s*설명해줘", "설명해줘"),
        (r"궁금하니까\s*알려줘", "알려줘"),
        (r"제가\s*이해할\s*수\s*있도록", ""),
        (r"초보자도\s*이해할\s*수\s*있도록", "쉽게"),
        (r"전문적인\s*관점에서", "전문가로서"),
        (r"체계적으로\s*정리해서", "정리해서"),
        (r"논리적으로\s*설명해서", "설명해서"),
        (r"단계별로\s*나누어서", "단계별로"),
        (r"실제\s*사례를\s*통해", "예시와 함께"),
        (r"자세히\s*설명해줘서\s*감사합니다", "설명해주세요"),
        (r"알려주셔서\s*감사합니다", "알려주세요"),
        (r"부탁드립니다\.?\s*감사합니다", "부탁드립니다"),
        (r"친절한\s*설명에\s*감사드립니다", "설명해주세요"),
    ];

    rules
        .iter()
        .map(|(pattern, replacement)| CompactionRuleSpec {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        })
        .collect()
}

fn contradiction_rules() -> Vec<ContradictionRuleSpec> {
    vec![
        ContradictionRuleSpec {
            family: ContradictionFamily::Permission,
            patterns: strings(&[
                r"never\s+\w+\s+without\s+\w+",
                r"auto[-\s]?\w+\s+[\w\s]*?immediately",
            ]),
            description: "절대 금지 지시와 자동 실행 지시의 모순".to_string(),
            example: "Never proceed without confirmation / auto-schedule immediately".to_string(),
            severity: Severity::High,
            fix_strategy: "우선순위를 명시하고 예외 조건을 분리하세요".to_string(),
        },
        ContradictionRuleSpec {
            family: ContradictionFamily::Confirmation,
            patterns: strings(&[
                r"always\s+confirm",
                r"proceed\s+without\s+(?:confirmation|asking)",
            ]),
            description: "항상 확인 지시와 확인 없는 진행 지시의 모순".to_string(),
            example: "Always confirm before acting / proceed without asking".to_string(),
            severity: Severity::High,
            fix_strategy: "중요 작업만 확인하는 조건부 로직으로 바꾸세요".to_string(),
        },
        ContradictionRuleSpec {
            family: ContradictionFamily::Thoroughness,
            patterns: strings(&[
                r"maximize\s+context|gather\s+(?:all\s+possible|everything)",
                r"thoroughly\s+\w+\s+all|read\s+all\s+(?:possible\s+)?files",
            ]),
            description: "무제한 수집 지시와 전수 탐색 지시의 중복 과잉".to_string(),
            example: "Maximize context gathering / read all possible files".to_string(),
            severity: Severity::Medium,
            fix_strategy: "충분하고 관련 있는 범위로 수집을 제한하세요".to_string(),
        },
    ]
}

fn anti_patterns() -> Vec<AntiPatternSpec> {
    vec![
        AntiPatternSpec {
            description: "과도한 철저함 강조".to_string(),
            examples: strings(&[
                "maximize context gathering",
                "be extremely thorough",
                "gather everything",
            ]),
            replacement: "Gather sufficient and relevant information".to_string(),
        },
        AntiPatternSpec {
            description: "탈출 조건 부재".to_string(),
            examples: strings(&[
                "never stop until perfect",
                "do not stop until everything is done",
            ]),
            replacement: "If 70% confident, proceed with best judgment".to_string(),
        },
        AntiPatternSpec {
            description: "모호한 도구 사용 기준".to_string(),
            examples: strings(&["use tools as needed", "use tools when appropriate"]),
            replacement:
                "Use tools when: 1) Information is missing, 2) Action is required, 3) Validation is needed"
                    .to_string(),
        },
    ]
}

fn agentic_tiers() -> AgenticTiersSpec {
    AgenticTiersSpec {
        low: AgenticTierSpec {
            description: "낮은 자율성 - 빠른 응답 우선".to_string(),
            prompt_patterns: strings(&[
                "Prefer answering from available context over further exploration",
                "Ask the user when a decision is ambiguous",
                "Stop after the stated task is done",
            ]),
            characteristics: strings(&[
                "Minimal tool calls",
                "Low exploration budget",
                "Defers uncertain decisions to the user",
            ]),
        },
        medium: AgenticTierSpec {
            description: "중간 자율성 - 균형잡힌 탐색".to_string(),
            prompt_patterns: strings(&[
                "Gather sufficient context before acting, then act",
                "Proceed on reasonable assumptions and document them",
                "Report progress at meaningful checkpoints",
            ]),
            characteristics: strings(&[
                "Bounded exploration",
                "Documents assumptions instead of asking",
                "Checkpoint progress updates",
            ]),
        },
        high: AgenticTierSpec {
            description: "높은 자율성 - 완료까지 지속".to_string(),
            prompt_patterns: strings(&[
                "Keep going until the task is completely resolved",
                "Do not hand back on uncertainty; decide and document",
                "Verify your work before declaring completion",
            ]),
            characteristics: strings(&[
                "Persists to completion",
                "Self-directed verification",
                "Escalates only on hard blockers",
            ]),
        },
    }
}

fn templates() -> Vec<TemplateSpec> {
    vec![
        TemplateSpec {
            id: "code_review".to_string(),
            name: "코드 리뷰 요청".to_string(),
            domain: Domain::Development,
            intent: Intent::Analyze,
            body: "시니어 개발자로서 다음 코드의 품질, 성능, 보안 측면에서 리뷰를 제공해주세요. {focus}에 특히 집중해주시고, 구체적인 개선 사항과 코드 예시를 포함해주세요. {additional_requirements}".to_string(),
            variables: strings(&["focus", "additional_requirements"]),
            description: "코드의 품질과 개선점을 종합적으로 분석해달라는 요청".to_string(),
            example_usage: "focus=성능 최적화, additional_requirements=시간 복잡도 분석 포함".to_string(),
            complexity: Complexity::Medium,
        },
        TemplateSpec {
            id: "debug_help".to_string(),
            name: "디버깅 도움 요청".to_string(),
            domain: Domain::Development,
            intent: Intent::Fix,
            body: "디버깅 전문가로서 다음 에러를 분석하고 해결책을 제안해주세요. 오류 메시지: {error_message}. 발생 환경: {context}. 가능한 원인과 해결 단계를 구체적으로 설명해주세요. {additional_context}".to_string(),
            variables: strings(&["error_message", "context", "additional_context"]),
            description: "프로그래밍 에러의 원인 분석과 해결책 요청".to_string(),
            example_usage: "error_message=TypeError in line 42, context=React component rendering".to_string(),
            complexity: Complexity::High,
        },
        TemplateSpec {
            id: "architecture_design".to_string(),
            name: "아키텍처 설계".to_string(),
            domain: Domain::Development,
            intent: Intent::Create,
            body: "소프트웨어 아키텍트로서 {project_type} 프로젝트의 아키텍처를 설계해주세요. 주요 요구사항: {requirements}. 확장성, 유지보수성, 성능을 고려하여 구성 요소와 상호작용을 설명해주세요. {tech_stack} 기반으로 설계해주세요.".to_string(),
            variables: strings(&["project_type", "requirements", "tech_stack"]),
            description: "소프트웨어 시스템의 아키텍처 설계 요청".to_string(),
            example_usage: "project_type=전자상거래, requirements=실시간 재고 관리, tech_stack=Microservices".to_string(),
            complexity: Complexity::High,
        },
        TemplateSpec {
            id: "campaign_strategy".to_string(),
            name: "마케팅 캠페인 전략".to_string(),
            domain: Domain::Marketing,
            intent: Intent::Plan,
            body: "마케팅 전략가로서 {product}의 마케팅 캠페인을 기획해주세요. 타겟: {target_audience}. 목표: {campaign_goals}. 채널: {channels}. 구체적인 실행 계획과 예상 효과를 포함해주세요. {additional_requirements}".to_string(),
            variables: strings(&[
                "product",
                "target_audience",
                "campaign_goals",
                "channels",
                "additional_requirements",
            ]),
            description: "제품/서비스의 마케팅 캠페인 전략 수립".to_string(),
            example_usage: "product=AI 헬스케어 앱, target_audience=2030대 건강 관심층, campaign_goals=가입자 1만명".to_string(),
            complexity: Complexity::High,
        },
        TemplateSpec {
            id: "copywriting".to_string(),
            name: "카피라이팅".to_string(),
            domain: Domain::Marketing,
            intent: Intent::Create,
            body: "전문 카피라이터로서 {product}의 마케팅 문구를 작성해주세요. 대상: {target}. 목적: {purpose}. 톤앤매너: {tone}. 핵심 장점을 강조하고 행동 촉구를 포함해주세요. {format}으로 작성해주세요.".to_string(),
            variables: strings(&["product", "target", "purpose", "tone", "format"]),
            description: "마케팅 광고 문구 작성".to_string(),
            example_usage: "product=유기농 주스, target=건강한 라이프스타일 추구자, purpose=구매 유도".to_string(),
            complexity: Complexity::Medium,
        },
        TemplateSpec {
            id: "blog_post".to_string(),
            name: "블로그 글 작성".to_string(),
            domain: Domain::Content,
            intent: Intent::Create,
            body: "전문 작가로서 '{title}' 주제의 블로그 글을 작성해주세요. 대상 독자: {audience}. 길이: {length}. 키워드: {keywords}. 톤앤매너: {tone}. SEO를 고려하고 실용적인 정보를 제공해주세요. 구조: {structure}.".to_string(),
            variables: strings(&["title", "audience", "length", "keywords", "tone", "structure"]),
            description: "SEO 최적화된 블로그 글 작성".to_string(),
            example_usage: "title=AI 업무 자동화, audience=IT 관리자, length=1500자".to_string(),
            complexity: Complexity::Medium,
        },
        TemplateSpec {
            id: "social_media".to_string(),
            name: "소셜 미디어 콘텐츠".to_string(),
            domain: Domain::Content,
            intent: Intent::Create,
            body: "콘텐츠 크리에이터로서 {platform} 플랫폼용 게시물을 작성해주세요. 주제: {topic}. 대상: {audience}. 목적: {goal}. 해시태그: {hashtags}. 이미지/영상과 함께 사용할 수 있도록 작성해주세요. {engagement_elements} 포함해주세요.".to_string(),
            variables: strings(&[
                "platform",
                "topic",
                "audience",
                "goal",
                "hashtags",
                "engagement_elements",
            ]),
            description: "소셜 미디어 플랫폼용 콘텐츠 제작".to_string(),
            example_usage: "platform=Instagram, topic=자기계발, audience=2030대 직장인".to_string(),
            complexity: Complexity::Low,
        },
        TemplateSpec {
            id: "business_proposal".to_string(),
            name: "비즈니스 제안서".to_string(),
            domain: Domain::Business,
            intent: Intent::Create,
            body: "비즈니스 컨설턴트로서 {project} 제안서를 작성해주세요. 고객사: {client}. 문제점: {problem}. 해결책: {solution}. 예상 효과: {benefits}. 예산: {budget}. 실행 계획과 ROI를 포함해주세요. {format}으로 정리해주세요.".to_string(),
            variables: strings(&[
                "project", "client", "problem", "solution", "benefits", "budget", "format",
            ]),
            description: "프로젝트나 솔루션 제안서 작성".to_string(),
            example_usage: "project=업무 자동화 시스템, client=중소 제조업체, problem=반복 작업 비효율".to_string(),
            complexity: Complexity::High,
        },
        TemplateSpec {
            id: "email_template".to_string(),
            name: "비즈니스 이메일".to_string(),
            domain: Domain::Business,
            intent: Intent::Create,
            body: "전문적인 비즈니스 이메일을 작성해주세요. 수신자: {recipient}. 목적: {purpose}. 주요 내용: {content}. 마감일: {deadline}. 형식: {email_type}. 명확하고 간결하게 작성해주세요. {additional_requirements}.".to_string(),
            variables: strings(&[
                "recipient",
                "purpose",
                "content",
                "deadline",
                "email_type",
                "additional_requirements",
            ]),
            description: "다양한 목적의 비즈니스 이메일 작성".to_string(),
            example_usage: "recipient=팀원, purpose=프로젝트 진행 상황 공유, email_type=업데이트 보고".to_string(),
            complexity: Complexity::Low,
        },
    ]
}
